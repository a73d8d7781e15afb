//! Workspace Entity
//!
//! The directory holding the input document. Assets, diagrams and output
//! live next to the input file as siblings.

use std::path::{Component, Path, PathBuf};

use crate::config::LayoutConfig;
use crate::error::{SpecBuildError, SpecBuildResult};

/// Resolved locations for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    input: PathBuf,
    basename: String,
    root: PathBuf,
    assets_dir: PathBuf,
    diagrams_dir: PathBuf,
    output_dir: PathBuf,
}

impl Workspace {
    /// Build a workspace around an (absolute) input file path.
    pub fn new(input: PathBuf, layout: &LayoutConfig) -> SpecBuildResult<Self> {
        let basename = basename_of(&input)
            .ok_or_else(|| SpecBuildError::InvalidInputName {
                path: input.clone(),
            })?
            .to_string();
        let root = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let workspace = Self {
            assets_dir: root.join(&layout.assets_dir),
            diagrams_dir: root.join(&layout.diagrams_dir),
            output_dir: root.join(&layout.output_dir),
            input,
            basename,
            root,
        };
        workspace.check_output_placement()?;
        Ok(workspace)
    }

    /// The output directory is wiped on every run, so it must sit apart from
    /// the workspace root and from every source directory.
    ///
    /// Paths are compared lexically; symlinks are not followed.
    fn check_output_placement(&self) -> SpecBuildResult<()> {
        let output = normalize(&self.output_dir);
        let unsafe_layout = |reason: String| SpecBuildError::UnsafeLayout {
            output: self.output_dir.clone(),
            reason,
        };

        if normalize(&self.root).starts_with(&output) {
            return Err(unsafe_layout(format!(
                "would contain the workspace root {}",
                self.root.display()
            )));
        }

        for (label, dir) in [("assets", &self.assets_dir), ("diagrams", &self.diagrams_dir)] {
            let dir = normalize(dir);
            if dir.starts_with(&output) || output.starts_with(&dir) {
                return Err(unsafe_layout(format!(
                    "overlaps the {} directory {}",
                    label,
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Text of the input file name before its first dot
    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn diagrams_dir(&self) -> &Path {
        &self.diagrams_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output>/<basename>.html`
    pub fn html_path(&self) -> PathBuf {
        self.artifact("html")
    }

    /// `<output>/<basename>.pdf`
    pub fn pdf_path(&self) -> PathBuf {
        self.artifact("pdf")
    }

    /// `<output>/<basename>.zip`
    pub fn zip_path(&self) -> PathBuf {
        self.artifact("zip")
    }

    fn artifact(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.basename, extension))
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Output basename of a document: its file name up to the first dot.
///
/// Returns `None` when the file name is missing, not UTF-8, or starts with a dot.
pub fn basename_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}
