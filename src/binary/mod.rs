//! Listing compiled binaries and the versions embedded in them.
//!
//! The [`BinaryVersionReader`] trait is the seam between enumeration and the
//! platform-specific format parsing, so tests can substitute their own reader.

pub mod enumerator;
pub mod pe;

pub use enumerator::BinaryEnumerator;
pub use pe::PeVersionReader;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Version strings embedded in a binary module; empty when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryVersionInfo {
    pub assembly_version: String,
    pub file_version: String,
    pub product_version: String,
}

/// A binary found during enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryModule {
    /// File stem, e.g. `MyLib` for `MyLib.dll`
    pub name: String,
    pub path: PathBuf,
    pub info: BinaryVersionInfo,
}

/// Reads version metadata from a binary without loading or executing it
pub trait BinaryVersionReader {
    /// # Returns
    /// * `Ok(BinaryVersionInfo)` - The embedded versions
    /// * `Err(AverError::NotABinary)` - The file is not a recognisable module
    /// * `Err` - The file could not be read
    fn read_versions(&self, path: &Path) -> Result<BinaryVersionInfo>;
}
