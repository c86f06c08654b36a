//! The queries the resolver needs answered.

use crate::Result;

/// A source of version-control metadata.
///
/// Each query returns `Ok(None)` when there is simply no answer, e.g. there
/// are no tags, and `Err` when the query itself broke. Answers are trimmed
/// and never empty.
pub trait GitMetadata {
    /// The commit referenced by the most recently committed tag.
    ///
    /// Equivalent to `git rev-list --tags --max-count=1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query could not be run.
    fn latest_tag_commit(&self) -> Result<Option<String>>;

    /// The descriptive tag name for `commit`, e.g. `v1.2.3-4-g5a6b7c8`.
    ///
    /// Equivalent to `git describe --tags <commit>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query could not be run.
    fn describe_tags(&self, commit: &str) -> Result<Option<String>>;

    /// The abbreviated id of the commit at `HEAD`.
    ///
    /// Equivalent to `git rev-parse --short HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query could not be run.
    fn short_head(&self) -> Result<Option<String>>;
}
