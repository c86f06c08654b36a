//! Resolve a version from git metadata and write it out.

use crate::source::GitMetadata;
use crate::{Error, Result, VersionString, normalize_tag};
use serde::Serialize;
use slog::Logger;
use std::fs;
use std::path::Path;

/// Where a resolved version came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Derived from the most recent tag.
    Tag,

    /// Nothing usable was found, so the version is `0.0.0`.
    Fallback,
}

/// The outcome of [`resolve()`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Resolution {
    /// The version to write.
    pub version: VersionString,

    /// Where `version` came from.
    pub origin: Origin,

    /// The commit of the most recent tag, if any.
    pub tag_commit: Option<String>,

    /// The descriptive tag name for `tag_commit`, if any.
    pub tag: Option<String>,

    /// The short id of `HEAD`, if it was needed and available.
    pub head: Option<String>,

    /// A candidate version that failed validation, e.g. `0.0.0-abc1234`.
    pub rejected: Option<String>,
}

/// Work out the version for the repository behind `source`.
///
/// This never fails. Missing or malformed metadata, and queries that break,
/// all end up as the fallback version `0.0.0`.
///
///   1. Find the commit of the most recently committed tag.
///   2. Describe it with tags and normalize that with [`normalize_tag()`].
///   3. If that didn’t produce a version other than `0.0.0`, build the
///      candidate `0.0.0-<short HEAD>`.
///   4. Validate the candidate as `MAJOR.MINOR.PATCH`, replacing it with
///      `0.0.0` if it doesn’t match. A `HEAD`-suffixed candidate is always
///      replaced.
///
/// ```
/// use appversion::resolver::{Origin, resolve};
/// use appversion::source::FixedSource;
/// use assert2::assert;
///
/// let log = slog::Logger::root(slog::Discard, slog::o!());
///
/// let resolution = resolve(&FixedSource::tagged("c0ffee1", "v1.2.3"), &log);
/// assert!(resolution.version.as_str() == "1.2.3");
/// assert!(resolution.origin == Origin::Tag);
///
/// let resolution = resolve(&FixedSource::untagged("abc1234"), &log);
/// assert!(resolution.version.as_str() == "0.0.0");
/// assert!(resolution.rejected.as_deref() == Some("0.0.0-abc1234"));
/// ```
#[must_use]
pub fn resolve<S: GitMetadata + ?Sized>(
    source: &S,
    log: &Logger,
) -> Resolution {
    let tag_commit =
        answer(log, "latest tag commit", source.latest_tag_commit());
    let tag = tag_commit.as_deref().and_then(|commit| {
        answer(log, "describe tags", source.describe_tags(commit))
    });

    let mut candidate = tag
        .as_deref()
        .and_then(normalize_tag)
        .unwrap_or_else(|| VersionString::FALLBACK.to_owned());

    let mut head = None;
    if candidate == VersionString::FALLBACK {
        head = answer(log, "short HEAD", source.short_head());
        if let Some(head) = &head {
            candidate = format!("{}-{head}", VersionString::FALLBACK);
        }
    }

    let (version, rejected) = match candidate.parse::<VersionString>() {
        Ok(version) => (version, None),
        Err(error) => {
            slog::info!(log, "Using fallback version"; "reason" => %error);
            (VersionString::default(), Some(candidate))
        }
    };

    let origin =
        if version.is_fallback() { Origin::Fallback } else { Origin::Tag };
    slog::info!(log, "Resolved version";
        "version" => %version,
        "origin" => ?origin,
        "tag" => ?tag
    );

    Resolution { version, origin, tag_commit, tag, head, rejected }
}

/// Unwrap the answer to a query, logging and discarding errors.
fn answer(
    log: &Logger,
    query: &str,
    result: Result<Option<String>>,
) -> Option<String> {
    match result {
        Ok(answer) => {
            slog::debug!(log, "Query answered";
                "query" => query,
                "answer" => ?answer
            );
            answer
        }
        Err(error) => {
            slog::debug!(log, "Query failed";
                "query" => query,
                "error" => %error
            );
            None
        }
    }
}

/// Write `version` to `path`, replacing whatever was there.
///
/// No newline is added.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file could not be written.
pub fn write_version<P: AsRef<Path>>(
    path: P,
    version: &VersionString,
) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, version.as_str())
        .map_err(|source| Error::Write { path: path.to_owned(), source })
}
