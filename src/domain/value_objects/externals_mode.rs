//! How external tools are located.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source of the diagram renderer and PDF converter binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExternalsMode {
    /// Bundled on Windows hosts, system binaries in containers and elsewhere
    #[default]
    Auto,
    /// Binaries shipped in the externals bundle directory
    Bundled,
    /// Binaries installed on `PATH`
    System,
}

impl ExternalsMode {
    pub const VALID_VALUES: &'static [&'static str] = &["auto", "bundled", "system"];

    /// Collapse `Auto` into a concrete mode for this host.
    pub fn resolve_for_host(self, is_windows: bool, in_container: bool) -> ExternalsMode {
        match self {
            ExternalsMode::Auto if is_windows && !in_container => ExternalsMode::Bundled,
            ExternalsMode::Auto => ExternalsMode::System,
            concrete => concrete,
        }
    }
}

impl fmt::Display for ExternalsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalsMode::Auto => f.write_str("auto"),
            ExternalsMode::Bundled => f.write_str("bundled"),
            ExternalsMode::System => f.write_str("system"),
        }
    }
}

impl FromStr for ExternalsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ExternalsMode::Auto),
            "bundled" => Ok(ExternalsMode::Bundled),
            "system" => Ok(ExternalsMode::System),
            other => Err(format!("unknown externals mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_bundled_only_on_bare_windows() {
        assert_eq!(
            ExternalsMode::Auto.resolve_for_host(true, false),
            ExternalsMode::Bundled
        );
        assert_eq!(
            ExternalsMode::Auto.resolve_for_host(true, true),
            ExternalsMode::System
        );
        assert_eq!(
            ExternalsMode::Auto.resolve_for_host(false, false),
            ExternalsMode::System
        );
    }

    #[test]
    fn explicit_modes_are_kept() {
        assert_eq!(
            ExternalsMode::Bundled.resolve_for_host(false, true),
            ExternalsMode::Bundled
        );
        assert_eq!(
            ExternalsMode::System.resolve_for_host(true, false),
            ExternalsMode::System
        );
    }
}
