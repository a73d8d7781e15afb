//! Input Resolution
//!
//! Finds the single document a build operates on.

use std::path::{Path, PathBuf};

use crate::error::{SpecBuildError, SpecBuildResult};
use crate::infrastructure::fs::list_files_with_suffix;

/// Resolve the input document.
///
/// With an explicit path (relative paths are taken from `working_dir`) the
/// entry must exist and be a regular file. Without one, `working_dir` must
/// hold exactly one file ending in `suffix`; subdirectories are not searched.
/// The returned path is absolute.
pub fn resolve_input(
    explicit: Option<&Path>,
    working_dir: &Path,
    suffix: &str,
) -> SpecBuildResult<PathBuf> {
    let path = match explicit {
        Some(path) => resolve_explicit(&working_dir.join(path))?,
        None => detect_single(working_dir, suffix)?,
    };
    Ok(std::path::absolute(&path)?)
}

fn resolve_explicit(path: &Path) -> SpecBuildResult<PathBuf> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SpecBuildError::InputNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(SpecBuildError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok(path.to_path_buf())
}

fn detect_single(dir: &Path, suffix: &str) -> SpecBuildResult<PathBuf> {
    let mut candidates = list_files_with_suffix(dir, suffix)?;
    tracing::debug!(dir = %dir.display(), suffix, found = candidates.len(), "input auto-detection");

    match candidates.len() {
        0 => Err(SpecBuildError::NoInputFound {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(SpecBuildError::AmbiguousInput {
            dir: dir.to_path_buf(),
            suffix: suffix.to_string(),
            candidates: candidates
                .into_iter()
                .map(|p| p.file_name().map(PathBuf::from).unwrap_or(p))
                .collect(),
        }),
    }
}
