//! Errors encountered while querying git or writing the version.

use std::io;
use std::path::PathBuf;
use std::result;
use std::string::FromUtf8Error;

/// `Result` type for `Error`.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Errors encountered while resolving or writing a version.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error reported by libgit2.
    #[error(transparent)]
    Git(#[from] git2::Error),

    /// The `git` executable could not be run.
    #[error("could not run `git {command}`: {source}")]
    Spawn {
        /// The arguments passed to `git`, shell quoted.
        command: String,

        /// The underlying IO error.
        source: io::Error,
    },

    /// `git` produced output that wasn’t valid UTF-8.
    #[error("`git {command}` produced invalid UTF-8: {source}")]
    NotUtf8 {
        /// The arguments passed to `git`, shell quoted.
        command: String,

        /// The underlying conversion error.
        source: FromUtf8Error,
    },

    /// The version file could not be written.
    #[error("could not write version to {path:?}: {source}")]
    Write {
        /// The file we tried to write.
        path: PathBuf,

        /// The underlying IO error.
        source: io::Error,
    },
}
