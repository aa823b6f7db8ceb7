use crate::domain::SemanticVersion;

/// The three version strings stamped into a build-metadata source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyVersion {
    pub assembly: String,
    pub file: String,
    pub informational: String,
}

impl AssemblyVersion {
    /// Version used when nothing better is known
    pub const DEFAULT_VERSION: &'static str = "1.0.0.0";

    /// Four-part numeric versions for assembly/file, full semver for informational.
    ///
    /// An unset version yields [`DEFAULT_VERSION`](Self::DEFAULT_VERSION) throughout.
    pub fn from_semver(version: &SemanticVersion) -> Self {
        if version.is_unset() {
            return Self::default();
        }
        let numeric = format!("{}.0", version.normal_version());
        AssemblyVersion {
            assembly: numeric.clone(),
            file: numeric,
            informational: version.full_version(),
        }
    }
}

impl Default for AssemblyVersion {
    fn default() -> Self {
        AssemblyVersion {
            assembly: Self::DEFAULT_VERSION.to_string(),
            file: Self::DEFAULT_VERSION.to_string(),
            informational: Self::DEFAULT_VERSION.to_string(),
        }
    }
}
