//! System Externals
//!
//! Tools installed on `PATH`, as in containers and non-Windows hosts.

use std::path::{Path, PathBuf};

use crate::config::ExternalsConfig;
use crate::domain::ports::ExternalsResolver;
use crate::domain::value_objects::{ExternalsBundle, ExternalsMode, ToolCommand};
use crate::error::{SpecBuildError, SpecBuildResult};

/// Resolves every tool through `PATH` unless an explicit path is configured.
pub struct SystemExternals {
    overrides: ExternalsConfig,
}

impl SystemExternals {
    pub fn new(overrides: ExternalsConfig) -> Self {
        Self { overrides }
    }
}

impl ExternalsResolver for SystemExternals {
    fn describe(&self) -> String {
        "system PATH".to_string()
    }

    fn resolve(&self) -> SpecBuildResult<ExternalsBundle> {
        let o = &self.overrides;
        Ok(ExternalsBundle {
            mode: ExternalsMode::System,
            java: locate("java", o.java.as_deref())?,
            bikeshed: ToolCommand::new("bikeshed", locate("bikeshed", o.bikeshed.as_deref())?),
            plantuml: ToolCommand::new("plantuml", locate("plantuml", o.plantuml.as_deref())?),
            dot: locate_optional("dot", o.dot.as_deref())?,
            wkhtmltopdf: ToolCommand::new(
                "wkhtmltopdf",
                locate("wkhtmltopdf", o.wkhtmltopdf.as_deref())?,
            ),
        })
    }
}

/// Use the configured path when given, otherwise search `PATH`.
pub(crate) fn locate(tool: &str, configured: Option<&Path>) -> SpecBuildResult<PathBuf> {
    if let Some(path) = configured {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(SpecBuildError::MissingPrerequisite {
                tool: tool.to_string(),
                reason: format!("configured path {} does not exist", path.display()),
            })
        };
    }

    match which::which(tool) {
        Ok(path) => {
            tracing::debug!(tool, path = %path.display(), "found tool on PATH");
            Ok(path)
        }
        Err(_) => Err(SpecBuildError::MissingPrerequisite {
            tool: tool.to_string(),
            reason: "not found on PATH; install it or set its path under [externals]".to_string(),
        }),
    }
}

/// Like [`locate`], but a tool absent from `PATH` is `None` rather than an
/// error. A configured path must still exist.
fn locate_optional(tool: &str, configured: Option<&Path>) -> SpecBuildResult<Option<PathBuf>> {
    if configured.is_some() {
        return locate(tool, configured).map(Some);
    }
    match which::which(tool) {
        Ok(path) => Ok(Some(path)),
        Err(_) => {
            tracing::debug!(tool, "not on PATH; leaving the lookup to PlantUML");
            Ok(None)
        }
    }
}
