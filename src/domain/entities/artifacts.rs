//! Build Artifacts
//!
//! The record returned by a successful pipeline run.

use std::path::PathBuf;

use serde::Serialize;

use super::Workspace;

/// Paths of the three artifacts produced by one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildArtifacts {
    pub basename: String,
    pub html: PathBuf,
    pub pdf: PathBuf,
    pub zip: PathBuf,
}

impl BuildArtifacts {
    pub fn for_workspace(workspace: &Workspace) -> Self {
        Self {
            basename: workspace.basename().to_string(),
            html: workspace.html_path(),
            pdf: workspace.pdf_path(),
            zip: workspace.zip_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn artifacts_serialize_as_flat_record() {
        let ws = Workspace::new(PathBuf::from("/w/spec.src.html"), &LayoutConfig::default())
            .unwrap();
        let json = serde_json::to_value(BuildArtifacts::for_workspace(&ws)).unwrap();

        assert_eq!(json["basename"], "spec");
        assert_eq!(json["html"], "/w/Output/spec.html");
        assert_eq!(json["pdf"], "/w/Output/spec.pdf");
        assert_eq!(json["zip"], "/w/Output/spec.zip");
    }
}
