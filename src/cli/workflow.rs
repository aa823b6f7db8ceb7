//! `list` and `set` workflows.
//!
//! Every invocation state (configuration, arguments, captured root version)
//! travels through [`RunContext`] and the returned reports; nothing is global.

use crate::binary::{BinaryEnumerator, BinaryModule, PeVersionReader};
use crate::config::Config;
use crate::domain::{Project, SemanticVersion};
use crate::error::Result;
use crate::policy::ResolutionPolicy;
use crate::rewrite::{ManifestRewriter, SourceAttributeRewriter, TextRewriter};
use crate::scanner::{ProjectScanner, ScanOutcome};
use crate::warnings::ScanWarning;
use std::path::PathBuf;
use tracing::warn;

/// Per-invocation context shared by the workflows
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub config: &'a Config,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        RunContext { config }
    }
}

/// Arguments for the list workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ListWorkflowArgs {
    /// Directory (or, for binaries, a single file) to examine
    pub location: PathBuf,

    /// Visit child directories
    pub recurse: bool,

    /// List compiled binaries instead of projects
    pub binaries: bool,
}

/// What the list workflow found
#[derive(Debug, Clone, PartialEq)]
pub enum ListReport {
    Projects(ScanOutcome),
    Binaries(Vec<BinaryModule>),
}

/// Arguments for the set workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetWorkflowArgs {
    /// Root directory of the scan
    pub location: PathBuf,

    /// Scan descendants of `location`
    pub recurse: bool,

    /// Version given on the command line
    pub version: Option<String>,

    /// Build metadata replacing any declared build metadata
    pub build: Option<String>,

    /// Let `version` win over declaration files
    pub override_declared: bool,
}

/// A file that could not be rewritten; the pass continued past it
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a set workflow
#[derive(Debug, Clone, PartialEq)]
pub struct SetReport {
    /// Projects with their resolved versions
    pub projects: Vec<Project>,

    /// Version declared at the scan root, if captured
    pub root_version: Option<SemanticVersion>,

    /// Version to announce as the build number
    pub build_number: Option<SemanticVersion>,

    /// Number of files rewritten
    pub files_written: usize,

    pub warnings: Vec<ScanWarning>,

    pub failures: Vec<RewriteFailure>,
}

/// List projects or binaries under `args.location`
pub fn run_list(args: &ListWorkflowArgs, ctx: RunContext<'_>) -> Result<ListReport> {
    if args.binaries {
        let reader = PeVersionReader::new();
        let modules = BinaryEnumerator::new(&reader, &ctx.config.list.binary_extensions)
            .enumerate(&args.location, args.recurse)?;
        return Ok(ListReport::Binaries(modules));
    }

    let outcome = ProjectScanner::new(&ctx.config.scan).scan(
        &args.location,
        &SemanticVersion::NO_VERSION,
        args.recurse,
    )?;
    Ok(ListReport::Projects(outcome))
}

/// Scan, resolve and write versions under `args.location`.
///
/// Fails before touching any file when `args.version` is malformed or the
/// root is missing. Per-file write errors are collected in the report.
pub fn run_set(args: &SetWorkflowArgs, ctx: RunContext<'_>) -> Result<SetReport> {
    let forced = args
        .version
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(SemanticVersion::parse)
        .transpose()?;

    let policy = ResolutionPolicy {
        forced_version: forced.clone(),
        override_declared: args.override_declared,
        build: args.build.clone().filter(|build| !build.is_empty()),
    };

    let seed = forced.unwrap_or(SemanticVersion::NO_VERSION);
    let outcome = ProjectScanner::new(&ctx.config.scan).scan(&args.location, &seed, args.recurse)?;

    let mut projects = outcome.projects;
    policy.apply(&mut projects);

    let source_rewriter = SourceAttributeRewriter::new(ctx.config.rewrite.banner.as_str());
    let manifest_rewriter = ManifestRewriter::new();

    let mut files_written = 0;
    let mut failures = Vec::new();
    for project in &projects {
        let mut targets: Vec<(&dyn TextRewriter, PathBuf)> = vec![(
            &source_rewriter as &dyn TextRewriter,
            project.source_attribute_file(&ctx.config.rewrite.source_attribute_file),
        )];
        if let Some(manifest) = &project.manifest_file {
            targets.push((&manifest_rewriter as &dyn TextRewriter, manifest.clone()));
        }

        for (rewriter, path) in targets {
            match rewriter.rewrite_file(&path, &project.version) {
                Ok(true) => files_written += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("Could not set version of {}: {}", path.display(), e);
                    failures.push(RewriteFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(SetReport {
        build_number: policy.reported_version(outcome.root_version.as_ref()),
        root_version: outcome.root_version,
        projects,
        files_written,
        warnings: outcome.warnings,
        failures,
    })
}
