use crate::domain::SemanticVersion;
use std::path::{Path, PathBuf};

/// A directory recognised as a project during a scan.
///
/// The scanner fills `version` from the inherited declaration context; the
/// resolution policy may replace it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    pub version: SemanticVersion,
    /// Package manifest found beside the project, if any
    pub manifest_file: Option<PathBuf>,
}

impl Project {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, version: SemanticVersion) -> Self {
        Project {
            name: name.into(),
            path: path.into(),
            version,
            manifest_file: None,
        }
    }

    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest_file = Some(manifest.into());
        self
    }

    /// Location of the build-metadata source file, relative paths resolved against the project
    pub fn source_attribute_file(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}
