//! CI pipeline integration
//!
//! Publishes named variables and error annotations in the dialect of the
//! CI system we run under. Detection is by environment variable only.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use specbuild::config::CiConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiProvider {
    /// Azure Pipelines (`TF_BUILD`)
    Azure,
    /// GitHub Actions (`GITHUB_ACTIONS`), with the step output file if any
    GitHub { output_file: Option<PathBuf> },
}

impl CiProvider {
    pub fn detect() -> Option<Self> {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    fn detect_with(get_env: impl Fn(&str) -> Option<String>) -> Option<Self> {
        if get_env("TF_BUILD").is_some() {
            return Some(CiProvider::Azure);
        }
        if get_env("GITHUB_ACTIONS").is_some() {
            return Some(CiProvider::GitHub {
                output_file: get_env("GITHUB_OUTPUT")
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from),
            });
        }
        None
    }

    /// Set pipeline variable `name` for later steps.
    ///
    /// Azure reads the logging command from `out`; GitHub reads the output
    /// file, so nothing is written to `out` there.
    pub fn set_variable(&self, name: &str, value: &str, out: &mut impl Write) -> io::Result<()> {
        let value = sanitize(value);
        match self {
            CiProvider::Azure => writeln!(out, "##vso[task.setvariable variable={}]{}", name, value),
            CiProvider::GitHub {
                output_file: Some(path),
            } => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)
            }
            CiProvider::GitHub { output_file: None } => {
                tracing::debug!(variable = name, "GITHUB_OUTPUT not set; variable not published");
                Ok(())
            }
        }
    }

    /// Error annotation line understood by the provider
    pub fn error_line(&self, message: &str, title: Option<&str>) -> String {
        self.annotation(AnnotationLevel::Error, message, None, title)
    }

    pub fn warning_line(&self, message: &str, file: Option<&str>) -> String {
        self.annotation(AnnotationLevel::Warning, message, file, None)
    }

    fn annotation(
        &self,
        level: AnnotationLevel,
        message: &str,
        file: Option<&str>,
        title: Option<&str>,
    ) -> String {
        match self {
            CiProvider::Azure => {
                let kind = match level {
                    AnnotationLevel::Warning => "warning",
                    AnnotationLevel::Error => "error",
                };
                let source = file
                    .map(|f| format!(";sourcepath={}", sanitize(f)))
                    .unwrap_or_default();
                format!("##vso[task.logissue type={}{}]{}", kind, source, sanitize(message))
            }
            CiProvider::GitHub { .. } => github_actions_annotation(level, message, file, title),
        }
    }
}

/// Writes the configured variables for one build.
///
/// With `--json`, stdout carries NDJSON only: each variable becomes a
/// `ci_variable` event there, and Azure's logging command moves to stderr,
/// which the agent scans as well.
pub struct CiPublisher {
    provider: CiProvider,
    names: CiConfig,
    json: bool,
}

impl CiPublisher {
    pub fn new(provider: CiProvider, names: CiConfig) -> Self {
        Self {
            provider,
            names,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn publish_basename(&self, basename: &str) {
        self.publish(&self.names.basename_variable, basename);
    }

    pub fn publish_error(&self, message: &str) {
        self.publish(&self.names.error_variable, message);
    }

    fn publish(&self, name: &str, value: &str) {
        let result = self.publish_to(
            name,
            value,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        );
        if let Err(err) = result {
            tracing::warn!(variable = name, error = %err, "failed to publish CI variable");
        }
    }

    fn publish_to(
        &self,
        name: &str,
        value: &str,
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> io::Result<()> {
        if !self.json {
            return self.provider.set_variable(name, value, stdout);
        }

        let event = serde_json::json!({
            "event": "ci_variable",
            "name": name,
            "value": sanitize(value),
        });
        crate::ui::json::write_event(stdout, &event)?;
        self.provider.set_variable(name, value, stderr)
    }
}

/// Drop line breaks so a value stays on one logging-command line.
pub fn sanitize(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Warning,
    Error,
}

pub fn github_actions_annotation(
    level: AnnotationLevel,
    message: &str,
    file: Option<&str>,
    title: Option<&str>,
) -> String {
    let level_str = match level {
        AnnotationLevel::Warning => "warning",
        AnnotationLevel::Error => "error",
    };

    let mut props = Vec::new();
    if let Some(file) = file {
        props.push(format!("file={}", escape_workflow_command_value(file)));
    }
    if let Some(title) = title {
        props.push(format!("title={}", escape_workflow_command_value(title)));
    }

    let prop_str = if props.is_empty() {
        String::new()
    } else {
        format!(" {}", props.join(","))
    };

    format!(
        "::{}{}::{}",
        level_str,
        prop_str,
        escape_workflow_command_value(message)
    )
}

fn escape_workflow_command_value(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
