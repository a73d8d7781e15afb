//! Diagram Rendering
//!
//! One PlantUML call renders every diagram source sitting directly in the
//! diagrams directory. Nested directories are not searched.

use crate::config::DiagramsConfig;
use crate::domain::entities::Workspace;
use crate::domain::ports::{ToolInvocation, ToolRunner};
use crate::domain::value_objects::ExternalsBundle;
use crate::error::{SpecBuildError, SpecBuildResult};
use crate::infrastructure::fs::list_files_with_extension;

/// What the diagram step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramRun {
    /// No diagrams directory in the workspace
    NoDirectory,
    /// Directory present but holds no matching sources
    NoSources,
    /// Renderer invoked over this many sources
    Rendered(usize),
}

/// Render diagrams into the output directory.
pub fn render_diagrams(
    workspace: &Workspace,
    bundle: &ExternalsBundle,
    config: &DiagramsConfig,
    runner: &dyn ToolRunner,
) -> SpecBuildResult<DiagramRun> {
    let dir = workspace.diagrams_dir();
    if !dir.is_dir() {
        return Ok(DiagramRun::NoDirectory);
    }

    let sources = list_files_with_extension(dir, &config.extension)?;
    if sources.is_empty() {
        return Ok(DiagramRun::NoSources);
    }

    let invocation = ToolInvocation::of(&bundle.plantuml)
        .args(bundle.graphviz_args())
        .arg(format!("-t{}", config.format))
        .arg("-o")
        .arg(workspace.output_dir())
        .arg("-timeout")
        .arg(config.timeout_secs.to_string())
        .args(&sources)
        .current_dir(dir);

    let output = runner.run(&invocation)?;
    if !output.success() {
        return Err(SpecBuildError::ToolFailed {
            tool: bundle.plantuml.name().to_string(),
            code: output.code,
            detail: output.combined(),
        });
    }

    tracing::info!(count = sources.len(), "rendered diagrams");
    Ok(DiagramRun::Rendered(sources.len()))
}
