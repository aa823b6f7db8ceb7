use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use aver::cli::{self, ListReport, ListWorkflowArgs, RunContext, SetWorkflowArgs};
use aver::{config, logging, ui};

#[derive(Parser)]
#[command(
    name = "aver",
    version,
    about = "Discover projects in a directory tree and stamp semantic versions into them"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Trace every directory, version file and override")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List versions of projects or binaries in a location
    List(ListArgs),
    /// Set versions of the projects in a location
    Set(SetArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(default_value = ".", help = "Directory (or binary file) to examine")]
    location: PathBuf,

    #[arg(short, long, help = "Visit child directories")]
    recurse: bool,

    #[arg(short, long, help = "List compiled binaries instead of projects")]
    binaries: bool,
}

#[derive(Args)]
struct SetArgs {
    #[arg(default_value = ".", help = "Root directory of the scan")]
    location: PathBuf,

    #[arg(short, long, help = "Scan the location and its descendants for projects")]
    recurse: bool,

    #[arg(
        id = "semver",
        short = 's',
        long = "version",
        value_name = "SEMVER",
        help = "Version to set; overrides version files only with --override"
    )]
    semver: Option<String>,

    #[arg(short, long, help = "Build metadata overriding any declared build metadata")]
    build: Option<String>,

    #[arg(short, long = "override", help = "Let --version win over version files")]
    override_declared: bool,

    #[arg(long, help = "Print the root version as a TeamCity build number message")]
    tcbuildno: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_logging(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let ctx = RunContext::new(&config);

    match args.command {
        Command::List(list) => run_list(list, ctx),
        Command::Set(set) => run_set(set, ctx),
    }
}

fn run_list(args: ListArgs, ctx: RunContext<'_>) -> Result<()> {
    let workflow_args = ListWorkflowArgs {
        location: args.location,
        recurse: args.recurse,
        binaries: args.binaries,
    };

    let report = match cli::run_list(&workflow_args, ctx) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match report {
        ListReport::Projects(outcome) => {
            for warning in &outcome.warnings {
                ui::display_scan_warning(warning);
            }
            for project in &outcome.projects {
                ui::display_project(project);
            }
            if outcome.projects.is_empty() {
                ui::display_status("No projects found");
            }
        }
        ListReport::Binaries(modules) => {
            for module in &modules {
                ui::display_binary(module);
            }
            if modules.is_empty() {
                ui::display_status("No binaries found");
            }
        }
    }

    Ok(())
}

fn run_set(args: SetArgs, ctx: RunContext<'_>) -> Result<()> {
    let workflow_args = SetWorkflowArgs {
        location: args.location,
        recurse: args.recurse,
        version: args.semver,
        build: args.build,
        override_declared: args.override_declared,
    };

    let report = match cli::run_set(&workflow_args, ctx) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    for warning in &report.warnings {
        ui::display_scan_warning(warning);
    }

    if args.tcbuildno {
        if let Some(version) = &report.build_number {
            println!("{}", ui::format_build_number(version));
        }
    }

    for project in &report.projects {
        ui::display_success(&format!("{} -> {}", project.name, project.version));
    }
    for failure in &report.failures {
        ui::display_error(&format!(
            "Could not write {}: {}",
            failure.path.display(),
            failure.reason
        ));
    }

    ui::display_status(&format!(
        "{} project(s), {} file(s) updated",
        report.projects.len(),
        report.files_written
    ));

    Ok(())
}
