use specbuild::{ErrorKind, SpecBuildError};

use crate::ui::ci::CiProvider;
use crate::ui::terminal::TerminalCapabilities;
use crate::ui::theme::{self, Icon};

/// Short remedy printed under an error of this kind
fn hint(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Prerequisite => Some(
            "Install the missing tool or point specbuild at it via [externals] in specbuild.toml. \
             Run 'specbuild doctor' to check.",
        ),
        ErrorKind::Input => Some(
            "Run specbuild in a directory holding exactly one source document, or pass its path.",
        ),
        ErrorKind::SelfTest => {
            Some("PlantUML cannot drive Graphviz; check the dot binary and the Java runtime.")
        }
        ErrorKind::Document => {
            Some("Fix the document, or rerun with --force to push through recoverable errors.")
        }
        ErrorKind::ToolFailed | ErrorKind::Config | ErrorKind::Io => None,
    }
}

fn format_error_with(err: &anyhow::Error, caps: TerminalCapabilities) -> String {
    let icon = Icon::Error.colored(caps.supports_color, caps.supports_unicode);
    let mut out = format!("{} {}\n", icon, err);

    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    if let Some(hint) = err.downcast_ref::<SpecBuildError>().and_then(|e| hint(e.kind())) {
        out.push_str(&format!("\n  {}\n", theme::dim(hint, caps.supports_color)));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool, caps: TerminalCapabilities) {
    let kind = err
        .downcast_ref::<SpecBuildError>()
        .map(|e| e.kind().as_str())
        .unwrap_or("internal");

    let annotation = if caps.is_ci {
        CiProvider::detect().map(|p| p.error_line(&err.to_string(), Some("specbuild")))
    } else {
        None
    };

    if json {
        let output = serde_json::json!({
            "event": "error",
            "kind": kind,
            "message": err.to_string(),
        });
        let _ = crate::ui::json::emit(output);
        // stdout stays NDJSON; the agent picks the annotation up from stderr
        if let Some(line) = annotation {
            eprintln!("{}", line);
        }
        return;
    }

    if let Some(line) = annotation {
        println!("{}", line);
    }

    eprint!("{}", format_error_with(err, caps));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PLAIN: TerminalCapabilities = TerminalCapabilities {
        supports_color: false,
        supports_unicode: false,
        is_ci: false,
    };

    #[test]
    fn input_errors_carry_a_hint() {
        let err = anyhow::Error::new(SpecBuildError::NoInputFound {
            dir: PathBuf::from("/work"),
            suffix: ".src.html".to_string(),
        });
        let text = format_error_with(&err, PLAIN);
        assert!(text.starts_with("[FAIL] expected exactly one '*.src.html' file in /work, found 0"));
        assert!(text.contains("exactly one source document"));
    }

    #[test]
    fn foreign_errors_render_with_causes() {
        let err = anyhow::anyhow!("disk full").context("writing output");
        let text = format_error_with(&err, PLAIN);
        assert!(text.contains("[FAIL] writing output"));
        assert!(text.contains("caused by: disk full"));
    }
}
