//! PDF Conversion

use std::path::{Path, PathBuf};

use crate::config::PdfConfig;
use crate::domain::entities::Workspace;
use crate::domain::ports::{ToolInvocation, ToolRunner};
use crate::domain::value_objects::ExternalsBundle;
use crate::error::{SpecBuildError, SpecBuildResult};

/// Convert `html` to `<output>/<basename>.pdf`.
///
/// wkhtmltopdf is told to abort when any sub-resource fails to load, so a
/// missing image fails the build instead of producing a partial PDF.
pub fn build_pdf(
    workspace: &Workspace,
    html: &Path,
    bundle: &ExternalsBundle,
    config: &PdfConfig,
    runner: &dyn ToolRunner,
) -> SpecBuildResult<PathBuf> {
    let pdf = workspace.pdf_path();
    let invocation = ToolInvocation::of(&bundle.wkhtmltopdf)
        .args(["--load-error-handling", "abort"])
        .args(&config.extra_args)
        .arg(html)
        .arg(&pdf)
        .current_dir(workspace.output_dir());

    let output = runner.run(&invocation)?;
    if !output.success() {
        return Err(SpecBuildError::ToolFailed {
            tool: bundle.wkhtmltopdf.name().to_string(),
            code: output.code,
            detail: output.combined(),
        });
    }

    tracing::info!(pdf = %pdf.display(), "pdf written");
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{bundle, workspace_in, FakeRunner};
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn converts_with_abort_on_load_error() {
        let dir = tempdir().unwrap();
        let ws = workspace_in(dir.path());
        std::fs::create_dir_all(ws.output_dir()).unwrap();
        let html = ws.html_path();
        let runner = FakeRunner::new();
        let config = PdfConfig {
            extra_args: vec!["--enable-local-file-access".to_string()],
        };

        let pdf = build_pdf(&ws, &html, &bundle(), &config, &runner).unwrap();

        assert_eq!(pdf, ws.output_dir().join("spec.pdf"));
        assert!(pdf.is_file());
        let calls = runner.calls_to("wkhtmltopdf");
        assert_eq!(
            calls[0].display(),
            format!(
                "wkhtmltopdf --load-error-handling abort --enable-local-file-access {} {}",
                html.display(),
                pdf.display()
            )
        );
    }

    #[test]
    fn non_zero_exit_is_fatal() {
        let dir = tempdir().unwrap();
        let ws = workspace_in(dir.path());
        std::fs::create_dir_all(ws.output_dir()).unwrap();
        let runner = FakeRunner::new().fail_when(
            "wkhtmltopdf",
            1,
            "Exit with code 1 due to network error: ContentNotFoundError",
        );

        let err = build_pdf(&ws, &ws.html_path(), &bundle(), &PdfConfig::default(), &runner)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ToolFailed);
        assert!(err.to_string().contains("ContentNotFoundError"));
        assert!(!ws.pdf_path().exists());
    }
}
