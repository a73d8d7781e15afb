//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Steps
//!
//! - `input` - Locate the single input document
//! - `output` - Reset the output directory and copy assets
//! - `diagrams` - Render PlantUML sources
//! - `document` - Validate and compile with Bikeshed
//! - `pdf` - Convert HTML with wkhtmltopdf
//! - `archive` - Zip the output directory
//!
//! `BuildPipeline` runs them in that order.

pub mod archive;
pub mod diagrams;
pub mod document;
pub mod input;
pub mod output;
pub mod pdf;
pub mod pipeline;
#[cfg(test)]
mod testing;

pub use diagrams::DiagramRun;
pub use pipeline::{BuildOptions, BuildPipeline};
