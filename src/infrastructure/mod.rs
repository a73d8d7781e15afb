//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process` - Tool runner over `std::process::Command`
//! - `externals/` - Bundled and system tool resolution, self-test
//! - `fs/` - Output directory and asset copying helpers
//! - `archive` - Zip packing and unpacking

pub mod archive;
pub mod externals;
pub mod fs;
pub mod process;

// Re-export for convenience
pub use externals::{select_resolver, BundledExternals, SystemExternals};
pub use process::ProcessRunner;
