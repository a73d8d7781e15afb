//! specbuild - build pipeline for Bikeshed specification documents
//!
//! specbuild finds a single Bikeshed source in a workspace, renders its
//! PlantUML diagrams, compiles it to HTML, converts the HTML to PDF and
//! packages the whole output directory into a zip archive. All content
//! transformation is delegated to external tools; this crate owns the
//! sequencing and the failure handling around them.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildOptions, BuildPipeline};
pub use config::Config;
pub use domain::entities::{BuildArtifacts, Workspace};
pub use domain::ports::{BuildEvent, BuildEventSink, ExternalsResolver, ToolRunner};
pub use domain::value_objects::{ExternalsBundle, ToolCommand};
pub use error::{ErrorKind, SpecBuildError, SpecBuildResult};
