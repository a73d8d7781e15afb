//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod externals_resolver;
pub mod tool_runner;

pub use build_events::{BuildEvent, BuildEventSink, BuildStep, NoopEventSink};
pub use externals_resolver::ExternalsResolver;
pub use tool_runner::{ToolInvocation, ToolOutput, ToolRunner};
