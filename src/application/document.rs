//! Document Compilation
//!
//! Runs Bikeshed over the input. In normal mode a dry-run validation pass
//! gates the real compile; forced mode compiles straight away and lets
//! Bikeshed push through recoverable errors.

use std::path::PathBuf;

use crate::config::DocumentConfig;
use crate::domain::entities::Workspace;
use crate::domain::ports::{ToolInvocation, ToolOutput, ToolRunner};
use crate::domain::value_objects::ExternalsBundle;
use crate::error::{DocumentStage, SpecBuildError, SpecBuildResult};

/// Compile the input to `<output>/<basename>.html` and return that path.
pub fn build_document(
    workspace: &Workspace,
    bundle: &ExternalsBundle,
    config: &DocumentConfig,
    force: bool,
    runner: &dyn ToolRunner,
) -> SpecBuildResult<PathBuf> {
    let html = workspace.html_path();
    let base = ToolInvocation::of(&bundle.bikeshed)
        .arg("--print=plain")
        .current_dir(workspace.root());

    let compile = if force {
        base.arg("--force")
    } else {
        let die_on = format!("--die-on={}", config.die_on);
        let validate = base
            .clone()
            .arg("--dry-run")
            .arg(&die_on)
            .arg("spec")
            .arg(workspace.input());
        let output = runner.run(&validate)?;
        if !output.success() {
            return Err(document_error(DocumentStage::Validation, workspace, &output));
        }
        tracing::info!("document validated");
        base.arg(&die_on)
    };

    let compile = compile.arg("spec").arg(workspace.input()).arg(&html);
    let output = runner.run(&compile)?;
    if !output.success() {
        return Err(document_error(DocumentStage::Compilation, workspace, &output));
    }

    if !html.is_file() {
        return Err(SpecBuildError::Document {
            stage: DocumentStage::Compilation,
            input: workspace.input().to_path_buf(),
            message: format!("bikeshed reported success but wrote no {}", html.display()),
        });
    }

    if force && !output.combined().is_empty() {
        tracing::warn!("bikeshed reported problems in forced mode:\n{}", output.combined());
    }

    Ok(html)
}

fn document_error(stage: DocumentStage, workspace: &Workspace, output: &ToolOutput) -> SpecBuildError {
    let combined = output.combined();
    let message = if combined.is_empty() {
        match output.code {
            Some(code) => format!("bikeshed exited with code {}", code),
            None => "bikeshed was terminated".to_string(),
        }
    } else {
        combined
    };

    SpecBuildError::Document {
        stage,
        input: workspace.input().to_path_buf(),
        message,
    }
}
