//! Tool Runner Port
//!
//! Executes one external tool and hands back what it printed. Exit status
//! interpretation is left to the caller.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ToolCommand;
use crate::error::SpecBuildResult;

/// A fully specified tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: String,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl ToolInvocation {
    /// Start an invocation from a tool command (program plus prefix args).
    pub fn of(command: &ToolCommand) -> Self {
        Self {
            tool: command.name().to_string(),
            program: command.program().to_path_buf(),
            args: command.prefix().to_vec(),
            current_dir: None,
        }
    }

    /// Start an invocation of a bare executable.
    pub fn program(tool: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Whether any argument equals `needle`
    pub fn has_arg(&self, needle: &str) -> bool {
        self.args.iter().any(|a| a == needle)
    }

    /// Command line rendered for logs
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().to_string()));
        parts.join(" ")
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stderr and stdout joined, stderr first, blank parts dropped
    pub fn combined(&self) -> String {
        [self.stderr.trim_end(), self.stdout.trim_end()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Executes external tools
pub trait ToolRunner {
    /// Run to completion.
    ///
    /// Errors only when the process cannot be started; a non-zero exit is
    /// reported through [`ToolOutput::code`].
    fn run(&self, invocation: &ToolInvocation) -> SpecBuildResult<ToolOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, invocation: &ToolInvocation) -> SpecBuildResult<ToolOutput> {
        (**self).run(invocation)
    }
}
