//! Build Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables progress reporting, JSON event streams and CI publishing.

use std::fmt;
use std::path::PathBuf;

/// Pipeline step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Externals,
    Input,
    Output,
    Diagrams,
    Document,
    Pdf,
    Archive,
}

impl BuildStep {
    pub const ALL: [BuildStep; 7] = [
        BuildStep::Externals,
        BuildStep::Input,
        BuildStep::Output,
        BuildStep::Diagrams,
        BuildStep::Document,
        BuildStep::Pdf,
        BuildStep::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStep::Externals => "externals",
            BuildStep::Input => "input",
            BuildStep::Output => "output",
            BuildStep::Diagrams => "diagrams",
            BuildStep::Document => "document",
            BuildStep::Pdf => "pdf",
            BuildStep::Archive => "archive",
        }
    }

    /// Progress label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            BuildStep::Externals => "Checking external tools",
            BuildStep::Input => "Locating input document",
            BuildStep::Output => "Preparing output directory",
            BuildStep::Diagrams => "Rendering diagrams",
            BuildStep::Document => "Compiling document",
            BuildStep::Pdf => "Converting to PDF",
            BuildStep::Archive => "Packaging archive",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    StepStarted { step: BuildStep },
    StepSkipped { step: BuildStep, reason: String },
    StepFinished { step: BuildStep },

    /// Input document located; basename fixes every artifact name
    InputResolved { input: PathBuf, basename: String },

    /// Diagram renderer finished
    DiagramsRendered { count: usize },

    /// Forced mode bypassed validation
    ValidationSkipped,

    Completed {
        html: PathBuf,
        pdf: PathBuf,
        zip: PathBuf,
    },
}

/// Trait for receiving build events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait BuildEventSink {
    fn on_event(&self, event: BuildEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}
}

impl<T: BuildEventSink + ?Sized> BuildEventSink for &T {
    fn on_event(&self, event: BuildEvent) {
        (**self).on_event(event)
    }
}
