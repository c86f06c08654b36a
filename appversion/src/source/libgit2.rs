//! Answer metadata queries with libgit2.

use super::{GitMetadata, non_empty};
use crate::Result;
use git2::{
    DescribeOptions, ErrorCode, Oid, Repository, RepositoryOpenFlags, Sort,
};
use std::ffi::OsStr;
use std::fmt;
use std::iter;
use std::path::Path;

/// Queries a repository in-process.
pub struct Libgit2Source {
    /// The repository to query.
    repo: Repository,
}

impl Libgit2Source {
    /// Find the repository containing `path`.
    ///
    /// Like `git`, this walks up from `path` until it finds a repository.
    /// The path may be a working directory, a `.git` directory, or a bare
    /// repository.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository could be found or opened.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::discover_within(path, iter::empty::<&OsStr>())
    }

    /// Find the repository containing `path` without searching in or above
    /// any of the `ceilings`.
    ///
    /// This matches `git` with `GIT_CEILING_DIRECTORIES` set.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository could be found or opened.
    pub fn discover_within<P, I, C>(path: P, ceilings: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = C>,
        C: AsRef<OsStr>,
    {
        let repo = Repository::open_ext(
            path.as_ref(),
            RepositoryOpenFlags::empty(),
            ceilings,
        )?;
        Ok(Self { repo })
    }

    /// Path to the `.git` directory (or the bare repository).
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }
}

impl fmt::Debug for Libgit2Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Libgit2Source")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl GitMetadata for Libgit2Source {
    fn latest_tag_commit(&self) -> Result<Option<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        // Tags that don’t point to commits are skipped.
        revwalk.push_glob("refs/tags/*")?;

        Ok(revwalk.next().transpose()?.map(|oid| oid.to_string()))
    }

    fn describe_tags(&self, commit: &str) -> Result<Option<String>> {
        let object = match Oid::from_str(commit)
            .and_then(|oid| self.repo.find_object(oid, None))
        {
            Ok(object) => object,
            Err(error) if error.code() == ErrorCode::NotFound => {
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };

        match object.describe(DescribeOptions::new().describe_tags()) {
            Ok(describe) => Ok(non_empty(&describe.format(None)?)),
            Err(error) if error.code() == ErrorCode::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn short_head(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(error)
                if matches!(
                    error.code(),
                    ErrorCode::UnbornBranch | ErrorCode::NotFound
                ) =>
            {
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };

        let short_id = head.peel_to_commit()?.as_object().short_id()?;
        Ok(short_id.as_str().and_then(non_empty))
    }
}
