//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the pipeline with its runner and event sinks
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates the pipeline from the effective configuration

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
