//! appversion executable.

use anyhow::Context;
use appversion::resolver::{Resolution, resolve, write_version};
use appversion::source::{CommandSource, FixedSource, Libgit2Source};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;
mod params;

use params::{GitBackend, Params, Parser};

/// Wrapper to handle errors.
///
/// See [`cli()`].
fn main() -> ExitCode {
    let params = Params::parse();
    cli(&params).unwrap_or_else(|error| {
        let error = format!("{error}\n");
        if error.to_lowercase().starts_with("error") {
            params.warn(error).unwrap();
        } else {
            params.warn(format!("Error: {error}")).unwrap();
        }

        ExitCode::FAILURE
    })
}

/// Do the actual work.
///
/// Returns the exit code to use. Missing git metadata is not an error; only
/// failing to write the output is.
///
/// # Errors
///
/// This returns any errors encountered during the run so that they can be
/// outputted nicely in [`main()`].
fn cli(params: &Params) -> anyhow::Result<ExitCode> {
    let log = logging::init(params.verbose);
    let resolution = find_version(params, &log);

    let output = params.output_path();
    if params.dry_run {
        slog::info!(log, "Dry run; not writing version"; "path" => ?output);
    } else {
        write_version(&output, &resolution.version)?;
        slog::info!(log, "Wrote version";
            "path" => ?output,
            "version" => %resolution.version
        );
    }

    if params.json {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", serde_json::to_string(&resolution)?)
            .and_then(|()| stdout.flush())
            .context("could not write to stdout")?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve the version with the backend chosen in `params`.
fn find_version(params: &Params, log: &slog::Logger) -> Resolution {
    match params.git {
        GitBackend::Libgit2 => {
            match Libgit2Source::discover_within(
                &params.repo,
                ceiling_directories(),
            ) {
                Ok(source) => {
                    slog::debug!(log, "Found repository";
                        "path" => ?source.path()
                    );
                    resolve(&source, log)
                }
                Err(error) => {
                    slog::debug!(log, "No repository found";
                        "repo" => ?params.repo,
                        "error" => %error
                    );
                    resolve(&FixedSource::default(), log)
                }
            }
        }
        // `git` reads GIT_CEILING_DIRECTORIES itself.
        GitBackend::Cli => resolve(&CommandSource::new(&params.repo), log),
    }
}

/// Directories listed in `GIT_CEILING_DIRECTORIES`.
fn ceiling_directories() -> Vec<PathBuf> {
    env::var_os("GIT_CEILING_DIRECTORIES")
        .map(|dirs| env::split_paths(&dirs).collect())
        .unwrap_or_default()
}
