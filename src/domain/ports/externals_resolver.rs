//! Externals Resolver Port
//!
//! Locates the external tools for this host. Implementations are chosen once
//! at startup (bundled directory or system `PATH`).

use crate::domain::value_objects::ExternalsBundle;
use crate::error::SpecBuildResult;

/// Capability to produce the tool paths for one invocation
pub trait ExternalsResolver {
    /// Human-readable origin of the tools, for diagnostics
    fn describe(&self) -> String;

    /// Resolve every tool, performing any one-time setup the source needs.
    fn resolve(&self) -> SpecBuildResult<ExternalsBundle>;
}
