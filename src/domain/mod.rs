//! Domain types - versions and the projects they are stamped into

pub mod assembly_version;
pub mod project;
pub mod semver;

pub use assembly_version::AssemblyVersion;
pub use project::Project;
pub use semver::SemanticVersion;
