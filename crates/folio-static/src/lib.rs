//! Build pass for folio documentation sites.
//!
//! Takes the pages an upstream generator produced, runs the client bundle
//! against each one (preference seeding, placeholder hydration), and writes
//! the enhanced site plus its bundle manifest to the output tree.

pub mod assets;
pub mod builder;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
