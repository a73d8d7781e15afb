//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config, --externals) are inherited by all subcommands
//! - Running without a subcommand is the same as `specbuild build`

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use specbuild::domain::value_objects::ExternalsMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// specbuild - build pipeline for Bikeshed specification documents
#[derive(Parser, Debug)]
#[command(name = "specbuild")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'specbuild' without arguments to build the document in the current directory.")]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (replaces specbuild.toml and the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where external tools come from: auto, bundled or system
    #[arg(long, global = true, value_name = "MODE")]
    pub externals: Option<ExternalsMode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build HTML, PDF and zip archive from the input document
    Build {
        /// Input document (default: the single '*.src.html' in the current directory)
        input: Option<PathBuf>,

        /// Skip validation and let Bikeshed push through recoverable errors
        #[arg(short, long)]
        force: bool,
    },

    /// Resolve and self-test the external tools
    Doctor,

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// The subcommand to run, `build` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Build {
            input: None,
            force: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand_builds() {
        let cli = Cli::try_parse_from(["specbuild"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command_or_default(),
            Commands::Build {
                input: None,
                force: false
            }
        ));
    }

    #[test]
    fn test_cli_parse_build_with_input_and_force() {
        let cli = Cli::try_parse_from(["specbuild", "build", "doc.src.html", "--force"]).unwrap();
        match cli.command_or_default() {
            Commands::Build { input, force } => {
                assert_eq!(input, Some(PathBuf::from("doc.src.html")));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["specbuild", "doctor", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["specbuild", "-vv", "build"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_externals_flag() {
        let cli = Cli::try_parse_from(["specbuild", "--externals", "system"]).unwrap();
        assert_eq!(cli.externals, Some(ExternalsMode::System));

        let err = Cli::try_parse_from(["specbuild", "--externals", "nowhere"]).unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["specbuild", "config", "--color", "never"]).unwrap();
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }

    #[test]
    fn test_cli_config_file_flag() {
        let cli = Cli::try_parse_from(["specbuild", "--config", "ci.toml", "doctor"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }
}
