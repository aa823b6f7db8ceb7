use crate::error::{AverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "aver.toml";

/// Represents the complete configuration for aver.
///
/// Contains the scanning conventions, rewrite targets and binary listing options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub list: ListConfig,
}

fn default_version_file() -> String {
    "version.txt".to_string()
}

fn default_manifest_extension() -> String {
    "nuspec".to_string()
}

fn default_descriptor_extension() -> String {
    "csproj".to_string()
}

fn default_max_path_length() -> usize {
    4096
}

/// Naming conventions used while walking a directory tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanConfig {
    /// Version-declaration file name, matched case-sensitively
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Extension of package manifests (without the dot)
    #[serde(default = "default_manifest_extension")]
    pub manifest_extension: String,

    /// Extension of project descriptors (without the dot)
    #[serde(default = "default_descriptor_extension")]
    pub descriptor_extension: String,

    /// Directories whose full path exceeds this many bytes are skipped with a warning
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            version_file: default_version_file(),
            manifest_extension: default_manifest_extension(),
            descriptor_extension: default_descriptor_extension(),
            max_path_length: default_max_path_length(),
        }
    }
}

fn default_source_attribute_file() -> String {
    "Properties/AssemblyInfo.cs".to_string()
}

fn default_banner() -> String {
    "// Assembly versions set by aver".to_string()
}

/// Where and how versions are written back into projects.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RewriteConfig {
    /// Build-metadata source file, relative to the project directory
    #[serde(default = "default_source_attribute_file")]
    pub source_attribute_file: String,

    /// Comment line emitted above the generated attribute declarations
    #[serde(default = "default_banner")]
    pub banner: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            source_attribute_file: default_source_attribute_file(),
            banner: default_banner(),
        }
    }
}

fn default_binary_extensions() -> Vec<String> {
    vec!["exe".to_string(), "dll".to_string()]
}

/// Options for `aver list --binaries`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ListConfig {
    #[serde(default = "default_binary_extensions")]
    pub binary_extensions: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            binary_extensions: default_binary_extensions(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `aver.toml` in current directory
/// 3. `aver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| AverError::not_accessible(path, e))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration text, filling unset keys with defaults
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).map_err(|e| AverError::config(e.to_string()))?;
    Ok(config)
}
