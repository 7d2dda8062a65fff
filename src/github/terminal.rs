use crate::error::Result;
use crate::github::{input_from_env, ActionsPlatform, OutputValue, Summary};
use crate::ui;
use std::collections::HashMap;
use std::io::{self, Write};

/// Platform for running the check on a developer machine
///
/// Inputs are read like on GitHub Actions; everything else is printed to
/// `out` in a human-friendly form.
pub struct TerminalPlatform<W: Write = io::Stdout> {
    out: W,
    inputs: HashMap<String, String>,
}

impl TerminalPlatform<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalPlatform<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPlatform<W> {
    pub fn with_writer(out: W) -> Self {
        TerminalPlatform {
            out,
            inputs: HashMap::new(),
        }
    }

    /// Override an input, taking precedence over the environment
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Consume the platform, returning the writer
    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> ActionsPlatform for TerminalPlatform<W> {
    fn get_input(&self, name: &str) -> Result<String> {
        Ok(input_from_env(&self.inputs, name))
    }

    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", ui::format_status(message))?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", ui::format_warning(message))?;
        Ok(())
    }

    fn set_output(&mut self, name: &str, value: &OutputValue) -> Result<()> {
        let value = value.to_command_value()?;
        writeln!(self.out, "{}", ui::format_output(name, &value))?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        let text = summary.to_text();
        let mut lines = text.lines();
        if let Some(heading) = lines.next() {
            writeln!(self.out, "{}", ui::format_heading(heading))?;
        }
        for line in lines {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }
}
