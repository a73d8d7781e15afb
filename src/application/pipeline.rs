//! Build pipeline
//!
//! ## Flow
//!
//! 1. Resolve and self-test external tools
//! 2. Locate the input document
//! 3. Empty the output directory, copy assets
//! 4. Render diagrams
//! 5. Compile the document to HTML
//! 6. Convert HTML to PDF
//! 7. Zip the output directory
//!
//! Steps run strictly in order. The first failure ends the run and leaves
//! the output directory as far as it got; there is no retry or rollback.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::entities::{BuildArtifacts, Workspace};
use crate::domain::ports::{BuildEvent, BuildEventSink, BuildStep, ExternalsResolver, ToolRunner};
use crate::error::SpecBuildResult;
use crate::infrastructure::externals::{prepare_externals, select_resolver};
use crate::infrastructure::process::ProcessRunner;

use super::archive::build_archive;
use super::diagrams::{render_diagrams, DiagramRun};
use super::document::build_document;
use super::input::resolve_input;
use super::output::prepare_output;
use super::pdf::build_pdf;

/// Per-invocation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Explicit input document; auto-detected when `None`
    pub input: Option<PathBuf>,
    /// Skip Bikeshed validation
    pub force: bool,
    /// Directory searched for the input and used for relative paths
    pub working_dir: PathBuf,
}

impl BuildOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: None,
            force: false,
            working_dir: working_dir.into(),
        }
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Runs the seven build steps against one configuration.
pub struct BuildPipeline {
    config: Config,
    resolver: Box<dyn ExternalsResolver>,
    runner: Box<dyn ToolRunner>,
}

impl BuildPipeline {
    /// Pipeline using the host's externals resolver and real processes.
    pub fn new(config: Config) -> Self {
        let resolver = select_resolver(&config.externals);
        Self {
            config,
            resolver,
            runner: Box::new(ProcessRunner::new()),
        }
    }

    pub fn with_resolver(mut self, resolver: Box<dyn ExternalsResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_runner(mut self, runner: Box<dyn ToolRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(
        &self,
        options: &BuildOptions,
        events: &dyn BuildEventSink,
    ) -> SpecBuildResult<BuildArtifacts> {
        let runner = self.runner.as_ref();

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Externals,
        });
        let bundle = prepare_externals(self.resolver.as_ref(), runner)?;
        finished(events, BuildStep::Externals);

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Input,
        });
        let input = resolve_input(
            options.input.as_deref(),
            &options.working_dir,
            &self.config.layout.input_suffix,
        )?;
        let workspace = Workspace::new(input, &self.config.layout)?;
        tracing::info!(input = %workspace.input().display(), basename = workspace.basename(), "input resolved");
        events.on_event(BuildEvent::InputResolved {
            input: workspace.input().to_path_buf(),
            basename: workspace.basename().to_string(),
        });
        finished(events, BuildStep::Input);

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Output,
        });
        prepare_output(&workspace)?;
        finished(events, BuildStep::Output);

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Diagrams,
        });
        match render_diagrams(&workspace, &bundle, &self.config.diagrams, runner)? {
            DiagramRun::NoDirectory => skipped(
                events,
                BuildStep::Diagrams,
                format!("no {} directory", self.config.layout.diagrams_dir),
            ),
            DiagramRun::NoSources => skipped(
                events,
                BuildStep::Diagrams,
                format!("no *.{} files", self.config.diagrams.extension),
            ),
            DiagramRun::Rendered(count) => {
                events.on_event(BuildEvent::DiagramsRendered { count });
                finished(events, BuildStep::Diagrams);
            }
        }

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Document,
        });
        if options.force {
            events.on_event(BuildEvent::ValidationSkipped);
        }
        let html = build_document(
            &workspace,
            &bundle,
            &self.config.document,
            options.force,
            runner,
        )?;
        finished(events, BuildStep::Document);

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Pdf,
        });
        build_pdf(&workspace, &html, &bundle, &self.config.pdf, runner)?;
        finished(events, BuildStep::Pdf);

        events.on_event(BuildEvent::StepStarted {
            step: BuildStep::Archive,
        });
        build_archive(&workspace)?;
        finished(events, BuildStep::Archive);

        let artifacts = BuildArtifacts::for_workspace(&workspace);
        events.on_event(BuildEvent::Completed {
            html: artifacts.html.clone(),
            pdf: artifacts.pdf.clone(),
            zip: artifacts.zip.clone(),
        });
        Ok(artifacts)
    }
}

fn finished(events: &dyn BuildEventSink, step: BuildStep) {
    events.on_event(BuildEvent::StepFinished { step });
}

fn skipped(events: &dyn BuildEventSink, step: BuildStep, reason: String) {
    tracing::info!(%step, %reason, "step skipped");
    events.on_event(BuildEvent::StepSkipped { step, reason });
}
