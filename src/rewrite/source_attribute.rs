use crate::domain::{AssemblyVersion, SemanticVersion};
use crate::rewrite::TextRewriter;
use regex::Regex;

/// Comments out existing version attributes and appends fresh ones.
///
/// A block previously generated under the same banner is replaced rather than
/// commented out, so rewriting a file twice with one version gives the same text.
pub struct SourceAttributeRewriter {
    banner: String,
    attribute: Regex,
}

impl SourceAttributeRewriter {
    pub fn new(banner: impl Into<String>) -> Self {
        SourceAttributeRewriter {
            banner: banner.into(),
            attribute: Regex::new(
                r#"^(\s*)(\[assembly:\s*Assembly(?:Informational|File)?Version\(\s*".*?"\s*\)\])"#,
            )
            .expect("attribute pattern is a valid regex"),
        }
    }
}

impl TextRewriter for SourceAttributeRewriter {
    fn name(&self) -> &'static str {
        "source-attribute"
    }

    fn rewrite_lines(&self, lines: &[String], version: &SemanticVersion) -> Vec<String> {
        let assembly_version = AssemblyVersion::from_semver(version);

        let mut new_lines = Vec::with_capacity(lines.len() + 4);
        let mut remaining = lines.iter().peekable();
        while let Some(line) = remaining.next() {
            if line.trim() == self.banner.trim() {
                while remaining.next_if(|next| self.attribute.is_match(next)).is_some() {}
                continue;
            }
            new_lines.push(self.attribute.replace(line, "${1}//${2}").into_owned());
        }

        new_lines.push(self.banner.clone());
        new_lines.push(format!(
            "[assembly: AssemblyVersion(\"{}\")]",
            assembly_version.assembly
        ));
        new_lines.push(format!(
            "[assembly: AssemblyFileVersion(\"{}\")]",
            assembly_version.file
        ));
        new_lines.push(format!(
            "[assembly: AssemblyInformationalVersion(\"{}\")]",
            assembly_version.informational
        ));
        new_lines
    }
}
