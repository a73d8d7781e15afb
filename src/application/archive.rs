//! Archive Packaging

use std::path::PathBuf;

use crate::domain::entities::Workspace;
use crate::error::SpecBuildResult;
use crate::infrastructure::archive::zip_dir_contents;

/// Zip the whole output directory into `<output>/<basename>.zip`.
pub fn build_archive(workspace: &Workspace) -> SpecBuildResult<PathBuf> {
    let zip = workspace.zip_path();
    let files = zip_dir_contents(workspace.output_dir(), &zip)?;
    tracing::info!(zip = %zip.display(), files, "archive packaged");
    Ok(zip)
}
