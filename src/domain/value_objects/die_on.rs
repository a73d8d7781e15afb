//! Bikeshed `--die-on` level used by the validation pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message severity at which Bikeshed aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DieOn {
    Nothing,
    Fatal,
    LinkError,
    #[default]
    Warning,
    Everything,
}

impl DieOn {
    pub const VALID_VALUES: &'static [&'static str] =
        &["nothing", "fatal", "link-error", "warning", "everything"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DieOn::Nothing => "nothing",
            DieOn::Fatal => "fatal",
            DieOn::LinkError => "link-error",
            DieOn::Warning => "warning",
            DieOn::Everything => "everything",
        }
    }
}

impl fmt::Display for DieOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DieOn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nothing" => Ok(DieOn::Nothing),
            "fatal" => Ok(DieOn::Fatal),
            "link-error" | "link_error" => Ok(DieOn::LinkError),
            "warning" => Ok(DieOn::Warning),
            "everything" => Ok(DieOn::Everything),
            other => Err(format!("unknown die-on level '{}'", other)),
        }
    }
}
