//! Error types for specbuild
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for specbuild operations
pub type SpecBuildResult<T> = Result<T, SpecBuildError>;

/// Coarse failure category, used for exit reporting and CI routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A runtime dependency or system tool is absent
    Prerequisite,
    /// Input resolution failed (zero, multiple or non-file candidates)
    Input,
    /// A tool self-test reported a problem
    SelfTest,
    /// An external tool exited unsuccessfully
    ToolFailed,
    /// Bikeshed validation or compilation failed
    Document,
    /// Configuration could not be read
    Config,
    /// Filesystem or archive failure
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Prerequisite => "prerequisite",
            ErrorKind::Input => "input",
            ErrorKind::SelfTest => "self_test",
            ErrorKind::ToolFailed => "tool_failed",
            ErrorKind::Document => "document",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

/// Which Bikeshed pass produced a document error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStage {
    Validation,
    Compilation,
}

impl std::fmt::Display for DocumentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStage::Validation => write!(f, "validation"),
            DocumentStage::Compilation => write!(f, "compilation"),
        }
    }
}

/// Main error type for specbuild operations
#[derive(Error, Debug)]
pub enum SpecBuildError {
    /// Required runtime dependency could not be found or started
    #[error("required tool '{tool}' is not available: {reason}")]
    MissingPrerequisite { tool: String, reason: String },

    /// Bundled externals directory lacks an expected entry
    #[error("externals bundle is incomplete: {path} not found")]
    IncompleteBundle { path: PathBuf },

    /// Explicit input path does not exist
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Explicit input path is a directory (or other non-file entry)
    #[error("input path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Auto-detection found no candidate
    #[error("expected exactly one '*{suffix}' file in {dir}, found 0")]
    NoInputFound { dir: PathBuf, suffix: String },

    /// Auto-detection found several candidates
    #[error("expected exactly one '*{suffix}' file in {dir}, found {}: {}", .candidates.len(), display_paths(.candidates))]
    AmbiguousInput {
        dir: PathBuf,
        suffix: String,
        candidates: Vec<PathBuf>,
    },

    /// Input file name yields no usable basename
    #[error("cannot derive an output name from {path}")]
    InvalidInputName { path: PathBuf },

    /// Diagram renderer self-test reported an error
    #[error("{tool} self-test failed:\n{output}")]
    SelfTestFailed { tool: String, output: String },

    /// External tool returned a non-zero exit code
    #[error("{tool} failed with {}{}", describe_code(.code), describe_detail(.detail))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        detail: String,
    },

    /// Bikeshed rejected the document
    #[error("bikeshed {stage} failed for {}: {message}", .input.display())]
    Document {
        stage: DocumentStage,
        input: PathBuf,
        message: String,
    },

    /// Layout would let the output wipe or swallow the workspace's sources
    #[error("unsafe layout: output directory {output} {reason}")]
    UnsafeLayout { output: PathBuf, reason: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive error
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl SpecBuildError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpecBuildError::MissingPrerequisite { .. } | SpecBuildError::IncompleteBundle { .. } => {
                ErrorKind::Prerequisite
            }
            SpecBuildError::InputNotFound { .. }
            | SpecBuildError::NotAFile { .. }
            | SpecBuildError::NoInputFound { .. }
            | SpecBuildError::AmbiguousInput { .. }
            | SpecBuildError::InvalidInputName { .. } => ErrorKind::Input,
            SpecBuildError::SelfTestFailed { .. } => ErrorKind::SelfTest,
            SpecBuildError::ToolFailed { .. } => ErrorKind::ToolFailed,
            SpecBuildError::Document { .. } => ErrorKind::Document,
            SpecBuildError::InvalidConfig { .. } | SpecBuildError::UnsafeLayout { .. } => {
                ErrorKind::Config
            }
            SpecBuildError::Io(_) | SpecBuildError::Zip(_) => ErrorKind::Io,
        }
    }

    /// Bikeshed diagnostic message, when this is a document error
    pub fn document_message(&self) -> Option<&str> {
        match self {
            SpecBuildError::Document { message, .. } => Some(message),
            _ => None,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_detail(detail: &str) -> String {
    if detail.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", detail.trim())
    }
}
