//! specbuild CLI - build pipeline for Bikeshed specification documents
//!
//! Usage: specbuild [COMMAND]
//!
//! Commands:
//!   build   Build HTML, PDF and zip archive (default)
//!   doctor  Resolve and self-test the external tools
//!   config  Print the effective configuration

mod commands;
mod presentation;
mod ui;

use anyhow::Result;
use clap::Parser;

use presentation::{factory, Cli, Commands};
use ui::terminal::{detect_capabilities, with_color_choice, TerminalCapabilities};

fn main() {
    let cli = Cli::parse();
    let caps = with_color_choice(detect_capabilities(), cli.color);
    init_tracing(cli.verbose, caps.supports_color);

    let json = cli.json;
    if let Err(err) = run(cli, caps) {
        ui::error::print_error(&err, json, caps);
        std::process::exit(1);
    }
}

fn run(cli: Cli, caps: TerminalCapabilities) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let (config, warnings) =
        factory::load_config(cli.config.as_deref(), &working_dir, cli.externals)?;
    commands::report_config_warnings(&warnings, cli.json, caps);

    match cli.command_or_default() {
        Commands::Build { input, force } => {
            commands::build::cmd_build(config, input, force, working_dir, cli.json, caps)
        }
        Commands::Doctor => commands::doctor::cmd_doctor(&config, cli.json, caps),
        Commands::Config => commands::config::cmd_config(&config, cli.json),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, ansi: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "specbuild=warn",
        1 => "specbuild=info",
        2 => "specbuild=debug",
        _ => "specbuild=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}
