//! Version resolution applied to scanned projects.
//!
//! Precedence, highest first:
//! 1. a forced version with the override flag replaces whatever was scanned
//! 2. otherwise the version inherited from declaration files stays
//!
//! A build-metadata override is then applied on top of the winner.

use crate::domain::{Project, SemanticVersion};
use tracing::debug;

/// Inputs to version resolution, taken from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionPolicy {
    /// Version given on the command line
    pub forced_version: Option<SemanticVersion>,
    /// Replace declared versions with `forced_version`
    pub override_declared: bool,
    /// Replacement build metadata
    pub build: Option<String>,
}

impl ResolutionPolicy {
    /// Resolve the final version for one project
    pub fn resolve(&self, scanned: &SemanticVersion) -> SemanticVersion {
        let mut version = match (&self.forced_version, self.override_declared) {
            (Some(forced), true) => forced.clone(),
            _ => scanned.clone(),
        };

        if let Some(build) = &self.build {
            version = version.override_build(build.as_str());
        }

        version
    }

    /// Apply [`resolve`](Self::resolve) to every project in place
    pub fn apply(&self, projects: &mut [Project]) {
        for project in projects.iter_mut() {
            let resolved = self.resolve(&project.version);
            if resolved.full_version() != project.version.full_version() {
                debug!(
                    project = %project.name,
                    from = %project.version,
                    to = %resolved,
                    "Overriding version"
                );
            }
            project.version = resolved;
        }
    }

    /// Version to report as the build number.
    ///
    /// The root declaration when one was captured; the forced version when it
    /// overrides everything or nothing was declared.
    pub fn reported_version(&self, root_version: Option<&SemanticVersion>) -> Option<SemanticVersion> {
        let base = match (&self.forced_version, self.override_declared, root_version) {
            (Some(forced), true, _) => Some(forced.clone()),
            (_, _, Some(root)) => Some(root.clone()),
            (Some(forced), false, None) => Some(forced.clone()),
            (None, _, None) => None,
        };

        base.map(|version| match &self.build {
            Some(build) => version.override_build(build.as_str()),
            None => version,
        })
    }
}
