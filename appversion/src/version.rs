//! Strict `MAJOR.MINOR.PATCH` version strings.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A complete version string, e.g. `1.2.3`.
static STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex")
});

/// A version at the very start of a string, e.g. `1.2.3` in `1.2.3-4-gabc`.
static LEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+").expect("valid regex")
});

/// A run of digits.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// A validated `MAJOR.MINOR.PATCH` version.
///
/// Each component is one or more ASCII digits. Leading zeros are allowed,
/// which is why this isn’t a [`semver`](https://semver.org) version.
///
/// ```
/// use appversion::VersionString;
/// use assert2::assert;
///
/// assert!(let Ok(_) = "1.2.3".parse::<VersionString>());
/// assert!(let Err(_) = "1.2.3-abc1234".parse::<VersionString>());
/// assert!(VersionString::default().as_str() == "0.0.0");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    /// The version used when nothing better can be found.
    pub const FALLBACK: &'static str = "0.0.0";

    /// Get the version as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the fallback version, `0.0.0`.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0 == Self::FALLBACK
    }
}

impl Default for VersionString {
    fn default() -> Self {
        Self(Self::FALLBACK.to_owned())
    }
}

impl FromStr for VersionString {
    type Err = InvalidVersion;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if STRICT.is_match(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(InvalidVersion(input.to_owned()))
        }
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A string that isn’t a `MAJOR.MINOR.PATCH` version.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{0:?} is not a MAJOR.MINOR.PATCH version")]
pub struct InvalidVersion(pub String);

/// Turn a descriptive tag name into a version candidate.
///
/// Returns `None` if the tag is too short to hold a version (one character
/// or less). Otherwise, a single leading `v` is removed and:
///
///   1. If the rest starts with `MAJOR.MINOR.PATCH`, that is the version.
///   2. Otherwise, if it contains at least three runs of digits, the first
///      three are joined with `.`.
///   3. Otherwise the version is `0.0.0`.
///
/// ```
/// use appversion::normalize_tag;
/// use assert2::assert;
///
/// assert!(normalize_tag("v1.2.3-4-g5a6b7c8").as_deref() == Some("1.2.3"));
/// assert!(normalize_tag("release_2_0_1").as_deref() == Some("2.0.1"));
/// assert!(normalize_tag("v2.0").as_deref() == Some("0.0.0"));
/// assert!(normalize_tag("v").is_none());
/// ```
#[must_use]
pub fn normalize_tag(tag: &str) -> Option<String> {
    if tag.chars().nth(1).is_none() {
        return None;
    }

    let tag = tag.strip_prefix('v').unwrap_or(tag);
    if let Some(leading) = LEADING.find(tag) {
        return Some(leading.as_str().to_owned());
    }

    let numbers: Vec<&str> =
        NUMBER.find_iter(tag).take(3).map(|number| number.as_str()).collect();
    if numbers.len() == 3 {
        Some(numbers.join("."))
    } else {
        Some(VersionString::FALLBACK.to_owned())
    }
}
