use std::fmt;
use std::path::PathBuf;

/// Non-fatal problems met while walking a directory tree.
/// The scan continues past each of these; they are reported to the user afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanWarning {
    /// A version-declaration file exists but does not hold a valid version
    MalformedVersionFile { path: PathBuf, reason: String },
    /// A subdirectory path exceeds the configured maximum length
    PathTooLong { path: PathBuf, limit: usize },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::MalformedVersionFile { path, reason } => {
                write!(
                    f,
                    "Skipping version file '{}': {}",
                    path.display(),
                    reason
                )
            }
            ScanWarning::PathTooLong { path, limit } => {
                let shown: String = path.display().to_string().chars().take(60).collect();
                write!(
                    f,
                    "Skipping directory '{}...': path longer than {} bytes",
                    shown, limit
                )
            }
        }
    }
}
