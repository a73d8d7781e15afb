//! Domain Entities

mod artifacts;
mod workspace;

pub use artifacts::BuildArtifacts;
pub use workspace::{basename_of, Workspace};
