//! User interface module - console output for the `list` and `set` actions.

pub mod formatter;

pub use formatter::{
    display_binary, display_error, display_project, display_scan_warning, display_status,
    display_success, format_binary, format_build_number, format_project,
};
