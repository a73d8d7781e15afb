pub mod build;
pub mod config;
pub mod doctor;

use specbuild::config::ConfigWarning;

use crate::ui::ci::CiProvider;
use crate::ui::terminal::TerminalCapabilities;
use crate::ui::theme::Icon;

/// Surface unknown configuration keys without failing the run.
pub fn report_config_warnings(warnings: &[ConfigWarning], json: bool, caps: TerminalCapabilities) {
    let ci = if caps.is_ci { CiProvider::detect() } else { None };

    for warning in warnings {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "kind": "config",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
            continue;
        }

        if let Some(provider) = &ci {
            let file = warning.file.display().to_string();
            println!("{}", provider.warning_line(&warning.to_string(), Some(&file)));
        }
        eprintln!(
            "{} {}",
            Icon::Warning.colored(caps.supports_color, caps.supports_unicode),
            warning
        );
    }
}
