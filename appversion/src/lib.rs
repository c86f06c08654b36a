//! Derive an application version from git metadata.
//!
//! The [`resolver`] asks a [`source::GitMetadata`] for the most recent tag,
//! normalizes it into a strict `MAJOR.MINOR.PATCH` [`VersionString`], and
//! falls back to `0.0.0` whenever that isn’t possible.

mod errors;
pub use errors::*;

pub mod resolver;
pub mod source;

mod version;
pub use version::*;

#[cfg(test)]
pub mod test;
