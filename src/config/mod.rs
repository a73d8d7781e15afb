//! Configuration module for specbuild
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SPECBUILD_*)
//! 3. Explicit `--config` file, or project config (`specbuild.toml`)
//! 4. User config (`<config dir>/specbuild/config.toml`)
//! 5. Built-in defaults (lowest priority)

pub mod env_validator;
mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{
    CiConfig, Config, DiagramsConfig, DocumentConfig, ExternalsConfig, LayoutConfig, PdfConfig,
};
