//! Test environment for running the specbuild binary in isolation.
//!
//! `TestEnv` owns a temporary project directory, a temporary home (so the
//! user config never leaks in) and a `bin/` directory of fake external tools
//! written as shell scripts. The binary runs with a cleared environment
//! whose `PATH` holds only that `bin/` directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a specbuild command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    pub tools_dir: TempDir,
}

impl TestEnv {
    /// Empty project, empty tool directory
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("project dir"),
            home_dir: TempDir::new().expect("home dir"),
            tools_dir: TempDir::new().expect("tools dir"),
        }
    }

    /// Project with a fake tool chain that behaves like the real one
    #[cfg(unix)]
    pub fn with_fake_tools() -> Self {
        let env = Self::new();
        for (name, script) in fake_tools::ALL {
            env.write_tool(name, script);
        }
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    /// Replace (or add) one fake tool
    #[cfg(unix)]
    pub fn write_tool(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.tools_dir.path().join(name);
        fs::write(&path, script).expect("write tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod tool");
    }

    pub fn remove_tool(&self, name: &str) {
        fs::remove_file(self.tools_dir.path().join(name)).expect("remove tool");
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.project_path("Output"))
            .expect("Output dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_specbuild"));
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_clear()
            .env("PATH", self.tools_dir.path())
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("SPECBUILD_EXTERNALS", "system");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute specbuild");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// Fake external tools. They use shell builtins only, since `PATH` holds
/// nothing but the fakes themselves.
#[cfg(unix)]
pub mod fake_tools {
    pub const JAVA: &str = r#"#!/bin/sh
echo 'openjdk version "21.0.2" 2024-01-16' >&2
exit 0
"#;

    pub const DOT: &str = "#!/bin/sh\nexit 0\n";

    pub const PLANTUML: &str = r#"#!/bin/sh
outdir=""
fmt="png"
while [ $# -gt 0 ]; do
  case "$1" in
    -testdot)
      echo "Dot version: dot - graphviz version 12.2.1"
      echo "Installation seems OK. File generation OK"
      exit 0 ;;
    -graphvizdot|-timeout) shift ;;
    -o) shift; outdir="$1" ;;
    -t*) fmt="${1#-t}" ;;
    *.puml)
      name="${1##*/}"
      printf 'image' > "$outdir/${name%.puml}.$fmt" ;;
  esac
  shift
done
exit 0
"#;

    /// Self-test reports that Graphviz is unusable
    pub const PLANTUML_BROKEN_DOT: &str = r#"#!/bin/sh
echo "Error: dot executable is /nowhere/dot"
echo "File does not exist"
exit 0
"#;

    /// Fails validation (and non-forced compilation) when the input
    /// contains the word BROKEN.
    pub const BIKESHED: &str = r#"#!/bin/sh
dry=0
force=0
input=""
output=""
for arg in "$@"; do
  case "$arg" in
    --dry-run) dry=1 ;;
    --force) force=1 ;;
    -*) ;;
    spec) ;;
    *) if [ -z "$input" ]; then input="$arg"; else output="$arg"; fi ;;
  esac
done
broken=0
while IFS= read -r line || [ -n "$line" ]; do
  case "$line" in *BROKEN*) broken=1 ;; esac
done < "$input"
if [ "$broken" = 1 ] && [ "$force" = 0 ]; then
  echo "LINE 2: No 'dfn' refs found for 'BROKEN'." >&2
  echo "Did not generate, due to errors exceeding the allowed error level." >&2
  exit 2
fi
if [ "$dry" = 0 ]; then
  printf '<html><body>compiled</body></html>\n' > "$output"
fi
exit 0
"#;

    pub const WKHTMLTOPDF: &str = r#"#!/bin/sh
out=""
for arg in "$@"; do out="$arg"; done
printf '%%PDF-1.4\n' > "$out"
exit 0
"#;

    pub const ALL: [(&str, &str); 5] = [
        ("java", JAVA),
        ("dot", DOT),
        ("plantuml", PLANTUML),
        ("bikeshed", BIKESHED),
        ("wkhtmltopdf", WKHTMLTOPDF),
    ];
}
