//! Answer metadata queries by running `git`.

use super::{GitMetadata, non_empty};
use crate::{Error, Result};
use std::env;
use std::io;
use std::path::PathBuf;

/// Runs the `git` executable in a directory.
///
/// A `git` command that exits with an error counts as no answer. Only a
/// failure to run `git` at all is an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandSource {
    /// Working directory for `git`.
    dir: PathBuf,

    /// Passed to `git` as `GIT_CEILING_DIRECTORIES` if not empty.
    ceilings: Vec<PathBuf>,
}

impl CommandSource {
    /// Run `git` in `dir`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into(), ceilings: Vec::new() }
    }

    /// Don’t let `git` search for a repository in or above `ceiling`.
    #[must_use]
    pub fn ceiling<P: Into<PathBuf>>(mut self, ceiling: P) -> Self {
        self.ceilings.push(ceiling.into());
        self
    }

    /// Run `git` with `args` and return its trimmed output.
    ///
    /// # Errors
    ///
    /// Returns an error if `git` could not be run or its output wasn’t
    /// UTF-8. Returns `Ok(None)` if `git` failed or printed nothing.
    fn git(&self, args: &[&str]) -> Result<Option<String>> {
        let command = shell_words::join(args);

        let mut expression = duct::cmd("git", args.iter().copied())
            .dir(&self.dir)
            .stdout_capture()
            .stderr_capture()
            .unchecked();

        if !self.ceilings.is_empty() {
            let ceilings = env::join_paths(&self.ceilings).map_err(|error| {
                Error::Spawn {
                    command: command.clone(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, error),
                }
            })?;
            expression = expression.env("GIT_CEILING_DIRECTORIES", ceilings);
        }

        let output = expression.run().map_err(|source| Error::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|source| Error::NotUtf8 { command, source })?;
        Ok(non_empty(&stdout))
    }
}

impl GitMetadata for CommandSource {
    fn latest_tag_commit(&self) -> Result<Option<String>> {
        self.git(&["rev-list", "--tags", "--max-count=1"])
    }

    fn describe_tags(&self, commit: &str) -> Result<Option<String>> {
        self.git(&["describe", "--tags", commit])
    }

    fn short_head(&self) -> Result<Option<String>> {
        self.git(&["rev-parse", "--short", "HEAD"])
    }
}
