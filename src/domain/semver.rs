//! Semantic version value type following the SemVer 2.0 precedence rules.
//!
//! See https://semver.org/#spec-item-11 for the ordering implemented by
//! [`SemanticVersion::cmp`].

use crate::error::{AverError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(
            r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
        )
        .expect("version grammar is a valid regex")
    })
}

fn numeric_identifier() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| Regex::new(r"^(0|[1-9]\d*)$").expect("numeric identifier regex"))
}

/// Immutable semantic version.
///
/// Equality and hashing follow precedence: build metadata is ignored and
/// alphabetic prerelease identifiers compare case-insensitively, so
/// `1.0.0-RC.1+a == 1.0.0-rc.1+b`.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: String,
    build: String,
}

impl SemanticVersion {
    /// Sentinel meaning "no version set" (0.0.0, no prerelease, no build).
    pub const NO_VERSION: SemanticVersion = SemanticVersion {
        major: 0,
        minor: 0,
        patch: 0,
        prerelease: String::new(),
        build: String::new(),
    };

    /// Create a version without prerelease or build metadata
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: String::new(),
            build: String::new(),
        }
    }

    /// Create a version with explicit prerelease and build strings (either may be empty)
    pub fn with_parts(
        major: u32,
        minor: u32,
        patch: u32,
        prerelease: impl Into<String>,
        build: impl Into<String>,
    ) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: prerelease.into(),
            build: build.into(),
        }
    }

    /// Parse `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
    ///
    /// # Returns
    /// * `Ok(SemanticVersion)` - Parsed version
    /// * `Err(AverError::InvalidFormat)` - If the text does not match the grammar
    pub fn parse(text: &str) -> Result<Self> {
        let captures = grammar()
            .captures(text)
            .ok_or_else(|| AverError::invalid_format(format!("'{}' is not a semantic version", text)))?;

        let number = |index: usize| -> Result<u32> {
            let digits = &captures[index];
            digits.parse::<u32>().map_err(|_| {
                AverError::invalid_format(format!("version component '{}' is out of range", digits))
            })
        };

        Ok(SemanticVersion {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease: captures.get(4).map_or("", |m| m.as_str()).to_string(),
            build: captures.get(5).map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// Check the grammar without building a value
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// True when this compares equal to [`SemanticVersion::NO_VERSION`]
    pub fn is_unset(&self) -> bool {
        *self == Self::NO_VERSION
    }

    /// `major.minor.patch`
    pub fn normal_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Normal version plus `-prerelease` when present, without build metadata
    pub fn prerelease_version(&self) -> String {
        if self.prerelease.is_empty() {
            self.normal_version()
        } else {
            format!("{}-{}", self.normal_version(), self.prerelease)
        }
    }

    /// Normal version plus optional `-prerelease` and `+build`
    pub fn full_version(&self) -> String {
        if self.build.is_empty() {
            self.prerelease_version()
        } else {
            format!("{}+{}", self.prerelease_version(), self.build)
        }
    }

    /// Render using a format token.
    ///
    /// * `"F"` - full version (default [`Display`](fmt::Display) form)
    /// * `"P"` - normal version and prerelease
    /// * `"V"` - normal version only
    ///
    /// Any other token is rejected with `InvalidFormat`.
    pub fn format(&self, token: &str) -> Result<String> {
        match token {
            "F" => Ok(self.full_version()),
            "P" => Ok(self.prerelease_version()),
            "V" => Ok(self.normal_version()),
            other => Err(AverError::invalid_format(format!(
                "unknown version format token '{}'",
                other
            ))),
        }
    }

    /// Copy of this version with the build metadata replaced
    pub fn override_build(&self, build: impl Into<String>) -> Self {
        SemanticVersion {
            build: build.into(),
            ..self.clone()
        }
    }
}

impl Default for SemanticVersion {
    fn default() -> Self {
        Self::NO_VERSION
    }
}

impl FromStr for SemanticVersion {
    type Err = AverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_version())
    }
}

/// Compare two canonical decimal strings without overflowing
fn compare_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    let numeric = numeric_identifier();
    match (numeric.is_match(a), numeric.is_match(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn compare_prerelease(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = compare_identifier(l, r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| compare_prerelease(&self.prerelease, &other.prerelease))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.to_lowercase().hash(state);
    }
}
