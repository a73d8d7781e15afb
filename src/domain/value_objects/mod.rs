//! Domain Value Objects
//!
//! Immutable value types describing the tools the pipeline drives.

mod die_on;
mod externals_mode;
mod tools;

pub use die_on::DieOn;
pub use externals_mode::ExternalsMode;
pub use tools::{ExternalsBundle, ToolCommand};
