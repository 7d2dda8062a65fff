//! Pure formatting functions for terminal output.
//!
//! Functions here build the coloured lines shown on a local terminal; only
//! [display_error] prints.

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Red `ERROR:` prefixed line.
pub fn format_error(message: &str) -> String {
    format!("\x1b[31mERROR:\x1b[0m {}", message)
}

/// Yellow arrow status line.
pub fn format_status(message: &str) -> String {
    format!("\x1b[33m→\x1b[0m {}", message)
}

/// Yellow warning line.
pub fn format_warning(message: &str) -> String {
    format!("\x1b[33m⚠ WARNING:\x1b[0m {}", message)
}

/// Step output as `name=value`, name in cyan.
pub fn format_output(name: &str, value: &str) -> String {
    format!("\x1b[36m{}\x1b[0m={}", name, value)
}

/// Bold heading line.
pub fn format_heading(text: &str) -> String {
    format!("\n\x1b[1m{}\x1b[0m", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status() {
        assert_eq!(format_status("test status"), "\x1b[33m→\x1b[0m test status");
    }

    #[test]
    fn test_format_warning_contains_message() {
        assert!(format_warning("careful").ends_with("careful"));
    }

    #[test]
    fn test_format_output() {
        assert_eq!(format_output("a", "b"), "\x1b[36ma\x1b[0m=b");
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
