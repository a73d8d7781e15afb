//! Output Preparation

use crate::domain::entities::Workspace;
use crate::error::SpecBuildResult;
use crate::infrastructure::fs::{clear_dir_contents, copy_dir_contents};

/// Empty the output directory and copy static assets into it.
///
/// Returns the number of asset files copied; a missing (or non-directory)
/// assets path copies nothing.
pub fn prepare_output(workspace: &Workspace) -> SpecBuildResult<usize> {
    let output = workspace.output_dir();
    clear_dir_contents(output)?;

    let assets = workspace.assets_dir();
    if !assets.is_dir() {
        tracing::debug!(assets = %assets.display(), "no assets directory, skipping copy");
        return Ok(0);
    }

    let copied = copy_dir_contents(assets, output)?;
    tracing::info!(copied, "copied assets");
    Ok(copied)
}
