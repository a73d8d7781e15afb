use std::path::Path;

use anyhow::Result;
use specbuild::infrastructure::externals::{prepare_externals, select_resolver};
use specbuild::infrastructure::ProcessRunner;
use specbuild::{Config, ExternalsBundle, ToolCommand};

use crate::ui::terminal::TerminalCapabilities;
use crate::ui::theme::{self, Icon};

pub fn cmd_doctor(config: &Config, json: bool, caps: TerminalCapabilities) -> Result<()> {
    let resolver = select_resolver(&config.externals);
    let source = resolver.describe();

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "doctor",
            "externals": source,
        }))?;
    } else {
        eprintln!("Resolving external tools from {}", source);
    }

    let bundle = prepare_externals(resolver.as_ref(), &ProcessRunner::new())?;
    let tools = tool_lines(&bundle);

    if json {
        let paths: serde_json::Map<String, serde_json::Value> = tools
            .iter()
            .map(|(name, line)| (name.to_string(), serde_json::Value::from(line.clone())))
            .collect();
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "doctor",
            "mode": bundle.mode.to_string(),
            "tools": paths,
        }))?;
        return Ok(());
    }

    println!("Externals: {} ({})", source, bundle.mode);
    for (name, line) in &tools {
        println!("  {:<12} {}", name, line);
    }
    println!(
        "{} {}",
        Icon::Success.colored(caps.supports_color, caps.supports_unicode),
        theme::dim("Java runtime and PlantUML/Graphviz self-test OK", caps.supports_color)
    );
    Ok(())
}

fn tool_lines(bundle: &ExternalsBundle) -> Vec<(&'static str, String)> {
    vec![
        ("java", display_path(&bundle.java)),
        ("bikeshed", display_command(&bundle.bikeshed)),
        ("plantuml", display_command(&bundle.plantuml)),
        (
            "dot",
            bundle
                .dot
                .as_deref()
                .map(display_path)
                .unwrap_or_else(|| "(PlantUML default)".to_string()),
        ),
        ("wkhtmltopdf", display_command(&bundle.wkhtmltopdf)),
    ]
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn display_command(command: &ToolCommand) -> String {
    std::iter::once(command.program().as_os_str())
        .chain(command.prefix().iter().map(|a| a.as_os_str()))
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
