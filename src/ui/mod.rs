//! User interface module - terminal formatting.

pub mod formatter;

pub use formatter::{
    display_error, format_error, format_heading, format_output, format_status, format_warning,
};
