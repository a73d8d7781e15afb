//! Process Tool Runner
//!
//! Implements the ToolRunner port with `std::process::Command`.

use std::process::{Command, Stdio};

use crate::domain::ports::{ToolInvocation, ToolOutput, ToolRunner};
use crate::error::{SpecBuildError, SpecBuildResult};

/// Runs tools as child processes, capturing stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> SpecBuildResult<ToolOutput> {
        tracing::debug!(tool = %invocation.tool, command = %invocation.display(), "running tool");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| SpecBuildError::MissingPrerequisite {
                tool: invocation.tool.clone(),
                reason: format!("failed to start {}: {}", invocation.program.display(), e),
            })?;

        let result = ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        tracing::debug!(tool = %invocation.tool, code = ?result.code, "tool finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_program_is_prerequisite_error() {
        let inv = ToolInvocation::program("ghost", "/definitely/not/here/ghost-tool");
        let err = ProcessRunner::new().run(&inv).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Prerequisite);
        assert!(err.to_string().contains("ghost"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_output_and_exit_code() {
        let inv = ToolInvocation::program("sh", "/bin/sh")
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3");
        let out = ProcessRunner::new().run(&inv).unwrap();

        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn honours_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let inv = ToolInvocation::program("sh", "/bin/sh")
            .args(["-c", "pwd"])
            .current_dir(dir.path());
        let out = ProcessRunner::new().run(&inv).unwrap();

        let printed = std::path::PathBuf::from(out.stdout.trim());
        assert_eq!(
            printed.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
