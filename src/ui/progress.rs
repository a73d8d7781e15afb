//! Build event sinks for the terminal, NDJSON streams and CI.

use std::io::{self, Write};

use specbuild::domain::ports::{BuildEvent, BuildEventSink, BuildStep};

use crate::ui::ci::CiPublisher;
use crate::ui::terminal::TerminalCapabilities;
use crate::ui::theme::{self, Icon};

/// Human progress on stderr
pub struct ConsoleEventSink {
    caps: TerminalCapabilities,
}

impl ConsoleEventSink {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self { caps }
    }

    fn render(&self, event: &BuildEvent) -> Option<String> {
        let color = self.caps.supports_color;
        let unicode = self.caps.supports_unicode;
        match event {
            BuildEvent::StepStarted { step } => Some(format!(
                "{} {}",
                theme::dim(&step_counter(*step), color),
                step.label()
            )),
            BuildEvent::StepSkipped { reason, .. } => Some(format!(
                "      {} skipped: {}",
                Icon::Skipped.colored(color, unicode),
                reason
            )),
            BuildEvent::StepFinished { .. } => None,
            BuildEvent::InputResolved { input, .. } => {
                Some(format!("      {}", theme::dim(&input.display().to_string(), color)))
            }
            BuildEvent::DiagramsRendered { count } => Some(format!(
                "      {} rendered {} diagram{}",
                Icon::Success.colored(color, unicode),
                count,
                if *count == 1 { "" } else { "s" }
            )),
            BuildEvent::ValidationSkipped => Some(format!(
                "      {} validation skipped (--force)",
                Icon::Warning.colored(color, unicode)
            )),
            BuildEvent::Completed { .. } => Some(format!(
                "{} Build complete",
                Icon::Success.colored(color, unicode)
            )),
        }
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        if let Some(line) = self.render(&event) {
            eprintln!("{}", line);
        }
    }
}

fn step_counter(step: BuildStep) -> String {
    let index = BuildStep::ALL
        .iter()
        .position(|s| *s == step)
        .map_or(0, |i| i + 1);
    format!("[{}/{}]", index, BuildStep::ALL.len())
}

/// NDJSON events on stdout
pub struct JsonEventSink;

impl JsonEventSink {
    /// `None` for the completion event; the command prints the final record.
    fn to_json(event: &BuildEvent) -> Option<serde_json::Value> {
        let value = match event {
            BuildEvent::StepStarted { step } => serde_json::json!({
                "event": "step_started",
                "step": step.as_str(),
            }),
            BuildEvent::StepSkipped { step, reason } => serde_json::json!({
                "event": "step_skipped",
                "step": step.as_str(),
                "reason": reason,
            }),
            BuildEvent::StepFinished { step } => serde_json::json!({
                "event": "step_finished",
                "step": step.as_str(),
            }),
            BuildEvent::InputResolved { input, basename } => serde_json::json!({
                "event": "input_resolved",
                "input": input.display().to_string(),
                "basename": basename,
            }),
            BuildEvent::DiagramsRendered { count } => serde_json::json!({
                "event": "diagrams_rendered",
                "count": count,
            }),
            BuildEvent::ValidationSkipped => serde_json::json!({
                "event": "validation_skipped",
            }),
            BuildEvent::Completed { .. } => return None,
        };
        Some(value)
    }

    fn write(out: &mut impl Write, event: &BuildEvent) -> io::Result<()> {
        match Self::to_json(event) {
            Some(value) => crate::ui::json::write_event(out, &value),
            None => Ok(()),
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let mut out = io::stdout().lock();
        let _ = Self::write(&mut out, &event);
    }
}

/// Publishes the basename to CI once the input is known, then forwards.
pub struct CiEventSink<'a, S> {
    inner: S,
    publisher: Option<&'a CiPublisher>,
}

impl<'a, S: BuildEventSink> CiEventSink<'a, S> {
    pub fn new(inner: S, publisher: Option<&'a CiPublisher>) -> Self {
        Self { inner, publisher }
    }
}

impl<S: BuildEventSink> BuildEventSink for CiEventSink<'_, S> {
    fn on_event(&self, event: BuildEvent) {
        if let (Some(publisher), BuildEvent::InputResolved { basename, .. }) =
            (self.publisher, &event)
        {
            publisher.publish_basename(basename);
        }
        self.inner.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PLAIN: TerminalCapabilities = TerminalCapabilities {
        supports_color: false,
        supports_unicode: false,
        is_ci: false,
    };

    #[test]
    fn console_numbers_steps() {
        let sink = ConsoleEventSink::new(PLAIN);
        assert_eq!(
            sink.render(&BuildEvent::StepStarted {
                step: BuildStep::Diagrams
            })
            .as_deref(),
            Some("[4/7] Rendering diagrams")
        );
        assert_eq!(
            sink.render(&BuildEvent::StepFinished {
                step: BuildStep::Diagrams
            }),
            None
        );
        assert_eq!(
            sink.render(&BuildEvent::DiagramsRendered { count: 1 })
                .as_deref(),
            Some("      [OK] rendered 1 diagram")
        );
    }

    #[test]
    fn json_events_are_flat_records() {
        let mut out = Vec::new();
        JsonEventSink::write(
            &mut out,
            &BuildEvent::InputResolved {
                input: PathBuf::from("spec.src.html"),
                basename: "spec".to_string(),
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["event"], "input_resolved");
        assert_eq!(value["basename"], "spec");

        let mut out = Vec::new();
        JsonEventSink::write(
            &mut out,
            &BuildEvent::Completed {
                html: PathBuf::from("a.html"),
                pdf: PathBuf::from("a.pdf"),
                zip: PathBuf::from("a.zip"),
            },
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn ci_sink_without_publisher_only_forwards() {
        struct Count(std::cell::Cell<usize>);
        impl BuildEventSink for Count {
            fn on_event(&self, _event: BuildEvent) {
                self.0.set(self.0.get() + 1);
            }
        }

        let count = Count(std::cell::Cell::new(0));
        let sink = CiEventSink::new(&count, None);
        sink.on_event(BuildEvent::ValidationSkipped);
        sink.on_event(BuildEvent::InputResolved {
            input: PathBuf::from("a.src.html"),
            basename: "a".to_string(),
        });
        assert_eq!(count.0.get(), 2);
    }
}
