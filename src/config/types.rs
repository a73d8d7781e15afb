//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DieOn, ExternalsMode};
use crate::error::SpecBuildResult;

use super::loader::{self, ConfigWarning};

/// Workspace layout, relative to the directory holding the input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Suffix used to auto-detect the input document
    #[serde(default = "default_input_suffix")]
    pub input_suffix: String,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    #[serde(default = "default_diagrams_dir")]
    pub diagrams_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            input_suffix: default_input_suffix(),
            assets_dir: default_assets_dir(),
            diagrams_dir: default_diagrams_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_input_suffix() -> String {
    ".src.html".to_string()
}

fn default_assets_dir() -> String {
    "Assets".to_string()
}

fn default_diagrams_dir() -> String {
    "Diagrams".to_string()
}

fn default_output_dir() -> String {
    "Output".to_string()
}

/// Where external tools come from
///
/// Explicit tool paths win over both bundled and system lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExternalsConfig {
    #[serde(default)]
    pub mode: ExternalsMode,

    /// Bundle directory; defaults to `externals/` next to the executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bikeshed: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plantuml: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkhtmltopdf: Option<PathBuf>,
}

/// Diagram rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramsConfig {
    /// Source file extension, without the dot
    #[serde(default = "default_diagram_extension")]
    pub extension: String,

    /// PlantUML output format (`png`, `svg`, ...)
    #[serde(default = "default_diagram_format")]
    pub format: String,

    /// Per-invocation timeout handed to PlantUML, in seconds
    #[serde(default = "default_diagram_timeout")]
    pub timeout_secs: u64,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            extension: default_diagram_extension(),
            format: default_diagram_format(),
            timeout_secs: default_diagram_timeout(),
        }
    }
}

fn default_diagram_extension() -> String {
    "puml".to_string()
}

fn default_diagram_format() -> String {
    "png".to_string()
}

fn default_diagram_timeout() -> u64 {
    60
}

/// Bikeshed invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DocumentConfig {
    /// Severity at which validation fails
    #[serde(default)]
    pub die_on: DieOn,
}

/// wkhtmltopdf invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PdfConfig {
    /// Extra options placed before the input path
    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// CI pipeline variable names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiConfig {
    #[serde(default = "default_basename_variable")]
    pub basename_variable: String,

    #[serde(default = "default_error_variable")]
    pub error_variable: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            basename_variable: default_basename_variable(),
            error_variable: default_error_variable(),
        }
    }
}

fn default_basename_variable() -> String {
    "SPEC_BASENAME".to_string()
}

fn default_error_variable() -> String {
    "SPEC_BUILD_ERROR".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub externals: ExternalsConfig,

    #[serde(default)]
    pub diagrams: DiagramsConfig,

    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub pdf: PdfConfig,

    #[serde(default)]
    pub ci: CiConfig,
}

impl Config {
    /// Explicit file, else project file, else user file, else defaults;
    /// environment overrides applied last.
    pub fn load_layered(
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> SpecBuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_layered(explicit, working_dir)
    }

    /// Render as TOML for `specbuild config`
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
