//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{DieOn, ExternalsMode};
use crate::error::{SpecBuildError, SpecBuildResult};

use super::env_validator::{closest, parse_env_u64, parse_env_value};
use super::types::Config;

/// Project configuration file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "specbuild.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SpecBuildResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SpecBuildError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: closest(&key, KNOWN_KEYS).map(str::to_string),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the configuration for one invocation.
///
/// An explicit file must exist. Otherwise the first existing file among
/// `<working_dir>/specbuild.toml` and the user config is used. Environment
/// overrides are applied on top and their warnings returned alongside.
pub fn load_layered(
    explicit: Option<&Path>,
    working_dir: &Path,
) -> SpecBuildResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match candidate_files(working_dir).into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                load_with_warnings(&path)?
            }
            None => (Config::default(), Vec::new()),
        },
    };

    let (config, env_warnings) = with_env_overrides(config, |key| std::env::var(key).ok());
    for warning in env_warnings {
        tracing::warn!("{}", warning);
    }

    Ok((config, warnings))
}

fn candidate_files(working_dir: &Path) -> Vec<PathBuf> {
    let mut files = vec![working_dir.join(PROJECT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("specbuild").join("config.toml"));
    }
    files
}

/// Apply environment variable overrides (SPECBUILD_* prefix).
///
/// Invalid values keep the configured setting and yield a warning.
pub fn with_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();

    if let Some(raw) = get_env("SPECBUILD_EXTERNALS") {
        match parse_env_value::<ExternalsMode>("SPECBUILD_EXTERNALS", &raw, ExternalsMode::VALID_VALUES)
        {
            Ok(mode) => config.externals.mode = mode,
            Err(w) => warnings.push(w),
        }
    }

    if let Some(dir) = get_env("SPECBUILD_BUNDLE_DIR").filter(|v| !v.trim().is_empty()) {
        config.externals.bundle_dir = Some(PathBuf::from(dir));
    }

    if let Some(raw) = get_env("SPECBUILD_DIAGRAM_TIMEOUT") {
        match parse_env_u64("SPECBUILD_DIAGRAM_TIMEOUT", &raw) {
            Ok(secs) => config.diagrams.timeout_secs = secs,
            Err(w) => warnings.push(w),
        }
    }

    if let Some(raw) = get_env("SPECBUILD_DIE_ON") {
        match parse_env_value::<DieOn>("SPECBUILD_DIE_ON", &raw, DieOn::VALID_VALUES) {
            Ok(level) => config.document.die_on = level,
            Err(w) => warnings.push(w),
        }
    }

    if let Some(suffix) = get_env("SPECBUILD_INPUT_SUFFIX").filter(|v| !v.trim().is_empty()) {
        config.layout.input_suffix = suffix.trim().to_string();
    }

    (config, warnings)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "layout",
    "input_suffix",
    "assets_dir",
    "diagrams_dir",
    "output_dir",
    "externals",
    "mode",
    "bundle_dir",
    "java",
    "bikeshed",
    "plantuml",
    "dot",
    "wkhtmltopdf",
    "diagrams",
    "extension",
    "format",
    "timeout_secs",
    "document",
    "die_on",
    "pdf",
    "extra_args",
    "ci",
    "basename_variable",
    "error_variable",
];
