//! External Tools
//!
//! Chooses where tools come from (bundled directory or system `PATH`) and
//! checks that they work together before any output is touched.

mod bundled;
mod system;

use std::path::{Path, PathBuf};

use crate::config::ExternalsConfig;
use crate::domain::ports::{ExternalsResolver, ToolInvocation, ToolRunner};
use crate::domain::value_objects::{ExternalsBundle, ExternalsMode};
use crate::error::{SpecBuildError, SpecBuildResult};

pub use bundled::BundledExternals;
pub use system::SystemExternals;

/// Text PlantUML prints when `-testdot` cannot drive Graphviz
pub const SELF_TEST_ERROR_MARKER: &str = "Error";

/// Pick the resolver for this host and configuration.
pub fn select_resolver(config: &ExternalsConfig) -> Box<dyn ExternalsResolver> {
    let mode = config
        .mode
        .resolve_for_host(cfg!(windows), in_container());

    match mode {
        ExternalsMode::Bundled => {
            let dir = config
                .bundle_dir
                .clone()
                .unwrap_or_else(default_bundle_dir);
            Box::new(BundledExternals::new(dir, config.clone()))
        }
        _ => Box::new(SystemExternals::new(config.clone())),
    }
}

/// `externals/` next to the running executable
pub fn default_bundle_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("externals")))
        .unwrap_or_else(|| PathBuf::from("externals"))
}

/// Whether we run inside a container image
pub fn in_container() -> bool {
    std::env::var_os("container").is_some() || Path::new("/.dockerenv").exists()
}

/// Resolve every tool, then verify the Java runtime and the PlantUML/Graphviz
/// pairing. Nothing in the workspace is touched.
pub fn prepare_externals(
    resolver: &dyn ExternalsResolver,
    runner: &dyn ToolRunner,
) -> SpecBuildResult<ExternalsBundle> {
    tracing::debug!(source = %resolver.describe(), "resolving external tools");
    let bundle = resolver.resolve()?;
    verify_runtime(&bundle, runner)?;
    self_test_renderer(&bundle, runner)?;
    Ok(bundle)
}

/// `java -version` must start and succeed.
pub fn verify_runtime(bundle: &ExternalsBundle, runner: &dyn ToolRunner) -> SpecBuildResult<()> {
    let output = runner.run(&ToolInvocation::program("java", &bundle.java).arg("-version"))?;
    if output.success() {
        // java prints its version banner on stderr
        let banner = output.combined();
        tracing::debug!(version = %banner.lines().next().unwrap_or_default(), "java runtime found");
        Ok(())
    } else {
        Err(SpecBuildError::MissingPrerequisite {
            tool: "java".to_string(),
            reason: format!(
                "`{} -version` exited with {:?}: {}",
                bundle.java.display(),
                output.code,
                output.combined()
            ),
        })
    }
}

/// Run `plantuml -testdot` and fail when it reports an error.
pub fn self_test_renderer(
    bundle: &ExternalsBundle,
    runner: &dyn ToolRunner,
) -> SpecBuildResult<String> {
    let invocation = ToolInvocation::of(&bundle.plantuml)
        .args(bundle.graphviz_args())
        .arg("-testdot");
    let output = runner.run(&invocation)?;
    let report = output.combined();

    if !output.success() || report.contains(SELF_TEST_ERROR_MARKER) {
        tracing::error!("{}", report);
        return Err(SpecBuildError::SelfTestFailed {
            tool: bundle.plantuml.name().to_string(),
            output: report,
        });
    }

    tracing::debug!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ToolOutput;
    use crate::domain::value_objects::ToolCommand;
    use crate::error::ErrorKind;
    use std::cell::RefCell;

    struct Scripted {
        java: ToolOutput,
        testdot: ToolOutput,
        calls: RefCell<Vec<ToolInvocation>>,
    }

    impl ToolRunner for Scripted {
        fn run(&self, invocation: &ToolInvocation) -> SpecBuildResult<ToolOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            if invocation.has_arg("-testdot") {
                Ok(self.testdot.clone())
            } else {
                Ok(self.java.clone())
            }
        }
    }

    fn ok(stdout: &str) -> ToolOutput {
        ToolOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    fn bundle() -> ExternalsBundle {
        ExternalsBundle {
            mode: ExternalsMode::System,
            java: PathBuf::from("/usr/bin/java"),
            bikeshed: ToolCommand::new("bikeshed", "/usr/bin/bikeshed"),
            plantuml: ToolCommand::new("plantuml", "/usr/bin/plantuml"),
            dot: Some(PathBuf::from("/usr/bin/dot")),
            wkhtmltopdf: ToolCommand::new("wkhtmltopdf", "/usr/bin/wkhtmltopdf"),
        }
    }

    struct Fixed(ExternalsBundle);

    impl ExternalsResolver for Fixed {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        fn resolve(&self) -> SpecBuildResult<ExternalsBundle> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn prepare_passes_when_testdot_is_clean() {
        let runner = Scripted {
            java: ok("openjdk 21"),
            testdot: ok("Dot version: dot - graphviz version 12.2.1\nInstallation seems OK. File generation OK"),
            calls: RefCell::new(Vec::new()),
        };

        let resolved = prepare_externals(&Fixed(bundle()), &runner).unwrap();
        assert_eq!(resolved, bundle());

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].display(),
            "/usr/bin/plantuml -graphvizdot /usr/bin/dot -testdot"
        );
    }

    #[test]
    fn self_test_error_marker_is_fatal() {
        let runner = Scripted {
            java: ok(""),
            testdot: ok("Error: cannot find Graphviz. You should try\n@startuml\ntestdot\n@enduml"),
            calls: RefCell::new(Vec::new()),
        };

        let err = prepare_externals(&Fixed(bundle()), &runner).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelfTest);
        assert!(err.to_string().contains("cannot find Graphviz"));
    }

    #[test]
    fn failing_java_is_prerequisite_error_and_skips_self_test() {
        let runner = Scripted {
            java: ToolOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: "no runtime".to_string(),
            },
            testdot: ok(""),
            calls: RefCell::new(Vec::new()),
        };

        let err = prepare_externals(&Fixed(bundle()), &runner).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Prerequisite);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn explicit_system_mode_selects_path_resolver() {
        let config = ExternalsConfig {
            mode: ExternalsMode::System,
            ..ExternalsConfig::default()
        };
        assert_eq!(select_resolver(&config).describe(), "system PATH");
    }

    #[test]
    fn explicit_bundled_mode_uses_configured_dir() {
        let config = ExternalsConfig {
            mode: ExternalsMode::Bundled,
            bundle_dir: Some(PathBuf::from("/opt/externals")),
            ..ExternalsConfig::default()
        };
        assert_eq!(
            select_resolver(&config).describe(),
            format!("bundle at {}", Path::new("/opt/externals").display())
        );
    }
}
