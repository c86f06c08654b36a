//! Where git metadata comes from.
//!
//! This module is organized into:
//! - [`definition`] - the [`GitMetadata`] trait
//! - [`libgit2`] - queries answered in-process with `git2`
//! - [`command`] - queries answered by running the `git` executable
//! - [`fixed`] - preset answers, for when there is no repository

pub mod command;
pub mod definition;
pub mod fixed;
pub mod libgit2;

pub use command::CommandSource;
pub use definition::GitMetadata;
pub use fixed::FixedSource;
pub use libgit2::Libgit2Source;

/// Trim query output, treating an empty result as no result.
fn non_empty(output: &str) -> Option<String> {
    let output = output.trim();
    if output.is_empty() {
        None
    } else {
        Some(output.to_owned())
    }
}
