use crate::domain::SemanticVersion;
use crate::rewrite::TextRewriter;
use regex::Regex;

/// Replaces the text of `<version>` elements in a package manifest.
///
/// Manifests carry the prerelease form of the version; build metadata is dropped.
pub struct ManifestRewriter {
    element: Regex,
}

impl ManifestRewriter {
    pub fn new() -> Self {
        ManifestRewriter {
            element: Regex::new(r"^(.*?<version>)\s*\S+\s*(</version>.*)$")
                .expect("version element pattern is a valid regex"),
        }
    }
}

impl Default for ManifestRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRewriter for ManifestRewriter {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn rewrite_lines(&self, lines: &[String], version: &SemanticVersion) -> Vec<String> {
        let replacement = format!("${{1}}{}${{2}}", version.prerelease_version());
        lines
            .iter()
            .map(|line| {
                self.element
                    .replace(line, replacement.as_str())
                    .into_owned()
            })
            .collect()
    }
}
