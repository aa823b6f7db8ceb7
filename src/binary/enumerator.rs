use crate::binary::{BinaryModule, BinaryVersionReader};
use crate::error::{AverError, Result};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Finds binaries by extension and reads each with a [`BinaryVersionReader`].
///
/// Files the reader rejects as not being modules are dropped silently.
/// Symbolic links are listed but never followed.
pub struct BinaryEnumerator<'a, R: BinaryVersionReader> {
    reader: &'a R,
    extensions: &'a [String],
}

impl<'a, R: BinaryVersionReader> BinaryEnumerator<'a, R> {
    pub fn new(reader: &'a R, extensions: &'a [String]) -> Self {
        BinaryEnumerator { reader, extensions }
    }

    /// Enumerate binaries at `location`, a single file or a directory.
    ///
    /// Results are in file-name order, parents before children.
    pub fn enumerate(&self, location: &Path, recurse: bool) -> Result<Vec<BinaryModule>> {
        if !location.exists() {
            return Err(AverError::MissingRoot(location.to_path_buf()));
        }

        let mut modules = Vec::new();
        if location.is_file() {
            self.inspect(location, &mut modules)?;
            return Ok(modules);
        }

        let walker = WalkDir::new(location)
            .max_depth(if recurse { usize::MAX } else { 1 })
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(location).to_path_buf();
                AverError::not_accessible(path, e.into())
            })?;
            if entry.file_type().is_dir() {
                debug!(directory = %entry.path().display(), "Entering directory");
            } else if entry.file_type().is_file() && self.has_binary_extension(entry.path()) {
                self.inspect(entry.path(), &mut modules)?;
            }
        }
        Ok(modules)
    }

    fn has_binary_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false)
    }

    fn inspect(&self, path: &Path, modules: &mut Vec<BinaryModule>) -> Result<()> {
        match self.reader.read_versions(path) {
            Ok(info) => {
                modules.push(BinaryModule {
                    name: path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path: path.to_path_buf(),
                    info,
                });
            }
            Err(AverError::NotABinary(_)) => {
                debug!(file = %path.display(), "Not a binary module, skipping");
            }
            Err(e @ AverError::NotAccessible { .. }) => {
                warn!("Skipping unreadable file: {}", e);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
