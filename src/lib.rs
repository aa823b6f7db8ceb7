pub mod binary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod policy;
pub mod rewrite;
pub mod scanner;
pub mod ui;
pub mod version_file;
pub mod warnings;

pub use error::{AverError, Result};
