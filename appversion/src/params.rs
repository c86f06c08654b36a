//! Code to deal with executable parameters.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

pub use clap::Parser;

/// Where the version is written by default, relative to the repository.
pub const DEFAULT_OUTPUT: &str = "QtScrcpy/appversion";

/// Write the version from the latest git tag to a file for the build
#[derive(Debug, clap::Parser)]
#[clap(version, about)]
pub struct Params {
    /// Whether or not to output in color
    #[clap(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorChoice,

    /// Verbosity (may be repeated up to three times)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory to look for a git repository in
    #[arg(
        short = 'C',
        long,
        default_value = ".",
        value_name = "DIR",
        env = "APPVERSION_REPO"
    )]
    pub repo: PathBuf,

    /// File to write the version to (relative to --repo)
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT,
        value_name = "PATH",
        env = "APPVERSION_OUTPUT"
    )]
    pub output: PathBuf,

    /// How to query git
    #[arg(
        long,
        default_value = "libgit2",
        value_name = "BACKEND",
        env = "APPVERSION_GIT"
    )]
    pub git: GitBackend,

    /// Print details about how the version was found as JSON
    #[arg(long)]
    pub json: bool,

    /// Find the version, but don’t write it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Params {
    /// The file to write the version to.
    ///
    /// Relative `--output` paths are relative to `--repo`.
    pub fn output_path(&self) -> PathBuf {
        self.repo.join(&self.output)
    }

    /// Print a warning message to stderr in error color.
    pub fn warn<S: AsRef<str>>(&self, message: S) -> io::Result<()> {
        let mut err_out =
            StandardStream::stderr(self.color_choice(&io::stderr()));
        err_out.set_color(&error_color())?;
        err_out.write_all(message.as_ref().as_bytes())?;
        err_out.reset()?;

        Ok(())
    }

    /// Whether or not to output on a stream in color.
    ///
    /// Checks if passed stream is a terminal.
    pub fn color_choice<T: IsTerminal>(
        &self,
        stream: &T,
    ) -> termcolor::ColorChoice {
        if self.color == ColorChoice::Auto && !stream.is_terminal() {
            termcolor::ColorChoice::Never
        } else {
            self.color.into()
        }
    }
}

/// How to query git
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum GitBackend {
    /// Use the built-in libgit2
    #[value(name = "libgit2")]
    Libgit2,

    /// Run the `git` executable
    Cli,
}

/// Whether or not to output in color
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Output in color when running in a terminal that supports it
    #[default]
    Auto,

    /// Always output in color
    Always,

    /// Never output in color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Returns color used to output errors.
pub fn error_color() -> ColorSpec {
    let mut color = ColorSpec::new();
    color.set_fg(Some(Color::Red));
    color.set_intense(true);
    color
}
