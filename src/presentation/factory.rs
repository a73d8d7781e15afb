//! Pipeline Factory
//!
//! Loads the effective configuration and wires the pipeline with its
//! infrastructure dependencies.

use std::path::Path;

use anyhow::Result;
use specbuild::config::{Config, ConfigWarning};
use specbuild::domain::value_objects::ExternalsMode;
use specbuild::BuildPipeline;

/// Layered configuration with the `--externals` flag applied on top.
pub fn load_config(
    explicit: Option<&Path>,
    working_dir: &Path,
    externals: Option<ExternalsMode>,
) -> Result<(Config, Vec<ConfigWarning>)> {
    let (mut config, warnings) = Config::load_layered(explicit, working_dir)?;
    if let Some(mode) = externals {
        config.externals.mode = mode;
    }
    Ok((config, warnings))
}

/// Pipeline over real processes and the host's externals resolver
pub fn create_pipeline(config: Config) -> BuildPipeline {
    BuildPipeline::new(config)
}
