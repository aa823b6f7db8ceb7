//! Command workflows, decoupled from clap so they can be driven programmatically.

pub mod workflow;

pub use workflow::{
    run_list, run_set, ListReport, ListWorkflowArgs, RewriteFailure, RunContext, SetReport,
    SetWorkflowArgs,
};
