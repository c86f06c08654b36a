//! A metadata source with preset answers.

use super::GitMetadata;
use crate::Result;

/// Answers queries from fixed values.
///
/// The default has no answers at all, which is what a directory outside of
/// any repository looks like.
///
/// ```
/// use appversion::source::{FixedSource, GitMetadata};
/// use assert2::assert;
///
/// let source = FixedSource::tagged("1f0c2d9", "v2.1.0");
/// assert2::let_assert!(Ok(Some(tag)) = source.describe_tags("1f0c2d9"));
/// assert!(tag == "v2.1.0");
/// assert!(let Ok(None) = source.describe_tags("abc1234"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FixedSource {
    /// Answer to [`GitMetadata::latest_tag_commit()`].
    pub tag_commit: Option<String>,

    /// Descriptive tag name returned for `tag_commit`.
    pub tag: Option<String>,

    /// Answer to [`GitMetadata::short_head()`].
    pub head: Option<String>,
}

impl FixedSource {
    /// A source with a tag on a commit.
    ///
    /// `HEAD` is the tagged commit.
    #[must_use]
    pub fn tagged<C, T>(commit: C, tag: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        let commit = commit.into();
        Self {
            head: Some(commit.clone()),
            tag_commit: Some(commit),
            tag: Some(tag.into()),
        }
    }

    /// A source with commits but no tags.
    #[must_use]
    pub fn untagged<H: Into<String>>(head: H) -> Self {
        Self { head: Some(head.into()), ..Self::default() }
    }
}

impl GitMetadata for FixedSource {
    fn latest_tag_commit(&self) -> Result<Option<String>> {
        Ok(self.tag_commit.clone())
    }

    fn describe_tags(&self, commit: &str) -> Result<Option<String>> {
        if self.tag_commit.as_deref() == Some(commit) {
            Ok(self.tag.clone())
        } else {
            Ok(None)
        }
    }

    fn short_head(&self) -> Result<Option<String>> {
        Ok(self.head.clone())
    }
}
