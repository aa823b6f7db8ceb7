//! Project discovery over a directory tree.
//!
//! The walk carries a "current version" down the recursion. A directory that
//! holds a version-declaration file replaces that version for itself and its
//! descendants; siblings are unaffected. A directory is a project when it
//! contains a package manifest or project descriptor whose file name starts
//! with the directory's own name.
//!
//! Subdirectories are visited in sorted path order, so the emitted projects
//! are a deterministic pre-order traversal.

use crate::config::ScanConfig;
use crate::domain::{Project, SemanticVersion};
use crate::error::{AverError, Result};
use crate::version_file;
use crate::warnings::ScanWarning;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Everything a scan produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    /// Projects in pre-order (parent before children)
    pub projects: Vec<Project>,
    /// Version declared at the root when no version was forced
    pub root_version: Option<SemanticVersion>,
    /// Recoverable problems that were skipped
    pub warnings: Vec<ScanWarning>,
}

/// Result of examining a single directory
#[derive(Debug)]
struct DirectoryVisit {
    project: Option<Project>,
    /// Version handed down to subdirectories
    version: SemanticVersion,
    declared: bool,
    subdirectories: Vec<PathBuf>,
}

/// Walks a tree and emits a [`Project`] for every project directory
pub struct ProjectScanner<'a> {
    config: &'a ScanConfig,
}

impl<'a> ProjectScanner<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        ProjectScanner { config }
    }

    /// Scan `root`, seeding the version context with `forced`.
    ///
    /// Pass [`SemanticVersion::NO_VERSION`] for no override. Only `root`
    /// itself is examined unless `recurse` is set.
    ///
    /// # Returns
    /// * `Ok(ScanOutcome)` - Projects, captured root version and skipped items
    /// * `Err(AverError::MissingRoot)` - `root` is not an existing directory
    /// * `Err(AverError::NotAccessible)` - A directory could not be listed
    pub fn scan(
        &self,
        root: &Path,
        forced: &SemanticVersion,
        recurse: bool,
    ) -> Result<ScanOutcome> {
        if !root.is_dir() {
            return Err(AverError::MissingRoot(root.to_path_buf()));
        }
        let root = fs::canonicalize(root).map_err(|e| AverError::not_accessible(root, e))?;

        let mut outcome = ScanOutcome::default();

        let visit = self.visit(&root, forced, &mut outcome.warnings)?;
        if visit.declared && forced.is_unset() {
            debug!(version = %visit.version, "Setting root version");
            outcome.root_version = Some(visit.version.clone());
        }

        self.collect(visit, recurse, &mut outcome)?;
        Ok(outcome)
    }

    fn collect(&self, visit: DirectoryVisit, recurse: bool, outcome: &mut ScanOutcome) -> Result<()> {
        if let Some(project) = visit.project {
            outcome.projects.push(project);
        }

        if !recurse {
            return Ok(());
        }

        for subdirectory in visit.subdirectories {
            if subdirectory.as_os_str().len() > self.config.max_path_length {
                let warning = ScanWarning::PathTooLong {
                    path: subdirectory,
                    limit: self.config.max_path_length,
                };
                warn!("{}", warning);
                outcome.warnings.push(warning);
                continue;
            }

            let child = self.visit(&subdirectory, &visit.version, &mut outcome.warnings)?;
            self.collect(child, recurse, outcome)?;
        }

        Ok(())
    }

    /// Examine one directory given the version inherited from its parent
    fn visit(
        &self,
        directory: &Path,
        inherited: &SemanticVersion,
        warnings: &mut Vec<ScanWarning>,
    ) -> Result<DirectoryVisit> {
        debug!(directory = %directory.display(), "Entering directory");

        let mut files = Vec::new();
        let mut subdirectories = Vec::new();
        let entries =
            fs::read_dir(directory).map_err(|e| AverError::not_accessible(directory, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AverError::not_accessible(directory, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| AverError::not_accessible(entry.path(), e))?;
            if file_type.is_dir() {
                subdirectories.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        subdirectories.sort();

        let mut version = inherited.clone();
        let mut declared = false;
        if files.iter().any(|name| *name == self.config.version_file) {
            let path = directory.join(&self.config.version_file);
            debug!(file = %path.display(), "Found version file");
            match version_file::read_version(&path) {
                Ok(parsed) => {
                    debug!(version = %parsed, "Parsed version");
                    version = parsed;
                    declared = true;
                }
                Err(e) => {
                    let reason = match e {
                        AverError::InvalidFormat(reason) => reason,
                        other => other.to_string(),
                    };
                    let warning = ScanWarning::MalformedVersionFile { path, reason };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        let project = project_name(directory).and_then(|name| {
            let manifest = self.find_prefixed(&files, &name, &self.config.manifest_extension);
            let descriptor = self.find_prefixed(&files, &name, &self.config.descriptor_extension);
            if manifest.is_none() && descriptor.is_none() {
                return None;
            }

            debug!(project = %name, version = %version, "Found project");
            let mut project = Project::new(name, directory, version.clone());
            if let Some(manifest) = manifest {
                project = project.with_manifest(directory.join(manifest));
            }
            Some(project)
        });

        Ok(DirectoryVisit {
            project,
            version,
            declared,
            subdirectories,
        })
    }

    /// First file named `<prefix>*.<extension>` (extension compared case-insensitively)
    fn find_prefixed<'f>(&self, files: &'f [String], prefix: &str, extension: &str) -> Option<&'f String> {
        files.iter().find(|name| {
            name.starts_with(prefix)
                && Path::new(name.as_str())
                    .extension()
                    .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
        })
    }
}

/// Name used as the project-file prefix; `None` for a filesystem root
fn project_name(directory: &Path) -> Option<String> {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
