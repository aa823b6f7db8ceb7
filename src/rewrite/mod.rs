//! In-place version rewriting of project files.
//!
//! Each rewriter is a pure lines-in/lines-out transform; [`TextRewriter::rewrite_file`]
//! wraps it with the file handling shared by all of them.

pub mod fs_util;
pub mod manifest;
pub mod source_attribute;

pub use manifest::ManifestRewriter;
pub use source_attribute::SourceAttributeRewriter;

use crate::domain::SemanticVersion;
use crate::error::{AverError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Rewrites version-bearing lines of a text file
pub trait TextRewriter {
    /// Short label used in diagnostics
    fn name(&self) -> &'static str;

    /// Transform the file's lines for `version`
    fn rewrite_lines(&self, lines: &[String], version: &SemanticVersion) -> Vec<String>;

    /// Rewrite `path` in place.
    ///
    /// # Returns
    /// * `Ok(true)` - The file was rewritten
    /// * `Ok(false)` - The file does not exist; nothing was done
    /// * `Err` - The file could not be read, made writable, or written
    fn rewrite_file(&self, path: &Path, version: &SemanticVersion) -> Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        debug!(rewriter = self.name(), file = %path.display(), version = %version, "Setting version");

        let content = fs::read_to_string(path).map_err(|e| AverError::not_accessible(path, e))?;
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let lines: Vec<String> = content.lines().map(str::to_string).collect();

        let mut output = self.rewrite_lines(&lines, version).join(line_ending);
        output.push_str(line_ending);

        fs_util::ensure_writable(path)?;
        fs::write(path, output).map_err(|e| AverError::not_accessible(path, e))?;
        Ok(true)
    }
}
