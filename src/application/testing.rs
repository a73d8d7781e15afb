//! Test doubles shared by the application tests

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;
use crate::domain::entities::Workspace;
use crate::domain::ports::{BuildEvent, BuildEventSink, ToolInvocation, ToolOutput, ToolRunner};
use crate::domain::value_objects::{ExternalsBundle, ExternalsMode, ToolCommand};
use crate::error::SpecBuildResult;

/// Bundle whose programs are bare tool names, for readable command lines
pub fn bundle() -> ExternalsBundle {
    ExternalsBundle {
        mode: ExternalsMode::System,
        java: PathBuf::from("java"),
        bikeshed: ToolCommand::new("bikeshed", "bikeshed"),
        plantuml: ToolCommand::new("plantuml", "plantuml"),
        dot: Some(PathBuf::from("dot")),
        wkhtmltopdf: ToolCommand::new("wkhtmltopdf", "wkhtmltopdf"),
    }
}

/// Workspace around a fresh `spec.src.html` in `root`
pub fn workspace_in(root: &Path) -> Workspace {
    let input = root.join("spec.src.html");
    fs::write(&input, "<pre class=metadata>\nTitle: Test\n</pre>\n").unwrap();
    Workspace::new(input, &LayoutConfig::default()).unwrap()
}

struct Failure {
    tool: String,
    when_arg: Option<String>,
    code: i32,
    stderr: String,
}

/// Records invocations and imitates the side effects of the real tools:
/// bikeshed and wkhtmltopdf write their last argument, plantuml writes one
/// image per source into its `-o` directory.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<ToolInvocation>>,
    failures: Vec<Failure>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every invocation of `tool` exits with `code`.
    pub fn fail_when(mut self, tool: &str, code: i32, stderr: &str) -> Self {
        self.failures.push(Failure {
            tool: tool.to_string(),
            when_arg: None,
            code,
            stderr: stderr.to_string(),
        });
        self
    }

    /// Invocations of `tool` carrying `arg` exit with `code`.
    pub fn fail_with_arg(mut self, tool: &str, arg: &str, code: i32, stderr: &str) -> Self {
        self.failures.push(Failure {
            tool: tool.to_string(),
            when_arg: Some(arg.to_string()),
            code,
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, tool: &str) -> Vec<ToolInvocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.tool == tool)
            .collect()
    }

    fn simulate(&self, invocation: &ToolInvocation) {
        let last = invocation.args.last().map(PathBuf::from);
        match invocation.tool.as_str() {
            "bikeshed" if !invocation.has_arg("--dry-run") => {
                if let Some(out) = last {
                    fs::write(out, "<html><body>compiled</body></html>").unwrap();
                }
            }
            "wkhtmltopdf" => {
                if let Some(out) = last {
                    fs::write(out, "%PDF-1.4").unwrap();
                }
            }
            "plantuml" if !invocation.has_arg("-testdot") => {
                let out_dir = invocation
                    .args
                    .iter()
                    .position(|a| a == "-o")
                    .and_then(|i| invocation.args.get(i + 1))
                    .map(PathBuf::from);
                if let Some(out_dir) = out_dir {
                    for arg in &invocation.args {
                        let path = Path::new(arg);
                        if path.extension().is_some_and(|e| e == "puml") {
                            let stem = path.file_stem().unwrap().to_string_lossy();
                            fs::write(out_dir.join(format!("{}.png", stem)), "png").unwrap();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &ToolInvocation) -> SpecBuildResult<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        let failure = self.failures.iter().find(|f| {
            f.tool == invocation.tool
                && f.when_arg.as_deref().map_or(true, |arg| invocation.has_arg(arg))
        });
        if let Some(f) = failure {
            return Ok(ToolOutput {
                code: Some(f.code),
                stdout: String::new(),
                stderr: f.stderr.clone(),
            });
        }

        self.simulate(invocation);
        Ok(ToolOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Collects events for assertions
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<BuildEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.borrow().clone()
    }
}

impl BuildEventSink for RecordingSink {
    fn on_event(&self, event: BuildEvent) {
        self.events.borrow_mut().push(event);
    }
}
