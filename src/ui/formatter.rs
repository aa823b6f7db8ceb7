//! Pure formatting functions for UI output.
//!
//! Diagnostics go through `tracing`; this module prints the results the user
//! asked for.

use crate::binary::BinaryModule;
use crate::domain::Project;
use crate::domain::SemanticVersion;
use crate::warnings::ScanWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a scan warning to the user.
pub fn display_scan_warning(warning: &ScanWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render a project as the lines printed by `aver list`.
pub fn format_project(project: &Project) -> Vec<String> {
    let version = if project.version.is_unset() {
        "(none)".to_string()
    } else {
        project.version.full_version()
    };

    let mut lines = vec![
        project.name.clone(),
        format!("  Location:           {}", project.path.display()),
        format!("  Version:            {}", version),
    ];
    if let Some(manifest) = &project.manifest_file {
        lines.push(format!("  Manifest:           {}", manifest.display()));
    }
    lines
}

/// Render a binary and its embedded versions.
pub fn format_binary(module: &BinaryModule) -> Vec<String> {
    vec![
        module.name.clone(),
        format!("  Location:           {}", module.path.display()),
        format!("  Assembly version:   {}", module.info.assembly_version),
        format!("  File version:       {}", module.info.file_version),
        format!("  Product version:    {}", module.info.product_version),
    ]
}

/// TeamCity service message announcing the build number.
///
/// The version grammar admits none of TeamCity's reserved characters, so the
/// value needs no escaping.
pub fn format_build_number(version: &SemanticVersion) -> String {
    format!("##teamcity[buildNumber '{}']", version.full_version())
}

pub fn display_project(project: &Project) {
    let lines = format_project(project);
    println!("{}", style(&lines[0]).bold());
    for line in &lines[1..] {
        println!("{}", line);
    }
    println!();
}

pub fn display_binary(module: &BinaryModule) {
    let lines = format_binary(module);
    println!("{}", style(&lines[0]).bold());
    for line in &lines[1..] {
        println!("{}", line);
    }
    println!();
}
