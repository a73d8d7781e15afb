//! Bundled Externals
//!
//! Tools shipped next to the executable, used on Windows hosts:
//!
//! ```text
//! externals/
//!   plantuml.jar
//!   graphviz.zip            unpacked once into graphviz/
//!   wkhtmltopdf/bin/wkhtmltopdf.exe
//! ```
//!
//! Java and Bikeshed are not bundled and still come from `PATH`.

use std::env::consts::EXE_SUFFIX;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExternalsConfig;
use crate::domain::ports::ExternalsResolver;
use crate::domain::value_objects::{ExternalsBundle, ExternalsMode, ToolCommand};
use crate::error::{SpecBuildError, SpecBuildResult};
use crate::infrastructure::archive::unzip_into;

use super::system::locate;

const PLANTUML_JAR: &str = "plantuml.jar";
const GRAPHVIZ_ARCHIVE: &str = "graphviz.zip";
const GRAPHVIZ_DIR: &str = "graphviz";

/// Resolves tools from a bundle directory.
pub struct BundledExternals {
    bundle_dir: PathBuf,
    overrides: ExternalsConfig,
}

impl BundledExternals {
    pub fn new(bundle_dir: PathBuf, overrides: ExternalsConfig) -> Self {
        Self {
            bundle_dir,
            overrides,
        }
    }

    fn require(&self, relative: &str) -> SpecBuildResult<PathBuf> {
        let path = self.bundle_dir.join(relative);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SpecBuildError::IncompleteBundle { path })
        }
    }

    /// Path of `dot`, unpacking the Graphviz archive on first use.
    fn graphviz_dot(&self) -> SpecBuildResult<PathBuf> {
        let target = self.bundle_dir.join(GRAPHVIZ_DIR);
        if let Some(dot) = find_dot(&target) {
            return Ok(dot);
        }

        let archive = self.require(GRAPHVIZ_ARCHIVE)?;
        tracing::info!(archive = %archive.display(), "unpacking bundled Graphviz");

        // Unpack beside the target and rename, so an interrupted run never
        // leaves a half-filled graphviz/ that passes the existence check.
        let staging = tempfile::Builder::new()
            .prefix(".graphviz-")
            .tempdir_in(&self.bundle_dir)?;
        unzip_into(&archive, staging.path())?;
        if target.exists() {
            fs::remove_dir_all(&target)?;
        }
        fs::rename(staging.path(), &target)?;

        find_dot(&target).ok_or_else(|| SpecBuildError::IncompleteBundle {
            path: target.join("bin").join(format!("dot{}", EXE_SUFFIX)),
        })
    }
}

impl ExternalsResolver for BundledExternals {
    fn describe(&self) -> String {
        format!("bundle at {}", self.bundle_dir.display())
    }

    fn resolve(&self) -> SpecBuildResult<ExternalsBundle> {
        let o = &self.overrides;

        let java = locate("java", o.java.as_deref())?;
        let bikeshed = locate("bikeshed", o.bikeshed.as_deref())?;

        let plantuml = match &o.plantuml {
            Some(path) => ToolCommand::new("plantuml", locate("plantuml", Some(path))?),
            None => {
                let jar = self.require(PLANTUML_JAR)?;
                ToolCommand::new("plantuml", java.clone())
                    .with_prefix([OsStr::new("-jar"), jar.as_os_str()])
            }
        };

        let dot = match &o.dot {
            Some(path) => locate("dot", Some(path))?,
            None => self.graphviz_dot()?,
        };
        let dot = Some(dot);

        let wkhtmltopdf = match &o.wkhtmltopdf {
            Some(path) => locate("wkhtmltopdf", Some(path))?,
            None => self.require(&format!("wkhtmltopdf/bin/wkhtmltopdf{}", EXE_SUFFIX))?,
        };

        Ok(ExternalsBundle {
            mode: ExternalsMode::Bundled,
            java,
            bikeshed: ToolCommand::new("bikeshed", bikeshed),
            plantuml,
            dot,
            wkhtmltopdf: ToolCommand::new("wkhtmltopdf", wkhtmltopdf),
        })
    }
}

/// `bin/dot` directly under `dir`, or under its single top-level folder
/// (archives often wrap everything in e.g. `Graphviz-12.2.1/`).
fn find_dot(dir: &Path) -> Option<PathBuf> {
    let name = format!("dot{}", EXE_SUFFIX);
    let direct = dir.join("bin").join(&name);
    if direct.is_file() {
        return Some(direct);
    }

    fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path().join("bin").join(&name))
        .find(|p| p.is_file())
}
