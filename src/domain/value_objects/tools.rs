//! Tool commands and the resolved externals bundle.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::ExternalsMode;

/// An executable plus the leading arguments every invocation needs.
///
/// `java -jar plantuml.jar` is one tool with program `java` and prefix
/// `["-jar", "plantuml.jar"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    name: String,
    program: PathBuf,
    prefix: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            prefix: Vec::new(),
        }
    }

    pub fn with_prefix<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.prefix
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Short name used in messages (`plantuml`, `wkhtmltopdf`, ...)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn prefix(&self) -> &[OsString] {
        &self.prefix
    }
}

/// Every tool the pipeline needs, resolved once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalsBundle {
    /// Concrete mode the bundle was resolved in (never `Auto`)
    pub mode: ExternalsMode,
    /// Java runtime required by PlantUML
    pub java: PathBuf,
    /// Bikeshed markup compiler
    pub bikeshed: ToolCommand,
    /// PlantUML diagram renderer
    pub plantuml: ToolCommand,
    /// Graphviz `dot` handed to PlantUML; `None` leaves the lookup to PlantUML
    pub dot: Option<PathBuf>,
    /// wkhtmltopdf HTML-to-PDF converter
    pub wkhtmltopdf: ToolCommand,
}

impl ExternalsBundle {
    /// `-graphvizdot <dot>` when a `dot` path was resolved
    pub fn graphviz_args(&self) -> Vec<&OsStr> {
        match &self.dot {
            Some(dot) => vec![OsStr::new("-graphvizdot"), dot.as_os_str()],
            None => Vec::new(),
        }
    }
}
