use crate::error::{ChangesetCheckError, Result};
use crate::github::{input_from_env, ActionsPlatform, OutputValue, Summary};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";
const SUMMARY_FILE_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Escape data for a workflow command
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

fn append_to_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Heredoc delimiter for file commands, unique per call
fn file_command_delimiter() -> String {
    format!("ghadelimiter_{}", Uuid::new_v4())
}

/// Format a `name<<delimiter` file command entry
fn file_command_entry(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(ChangesetCheckError::output(format!(
            "Output '{}' contains the file command delimiter",
            name
        )));
    }
    Ok(format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter))
}

/// GitHub Actions platform
///
/// Inputs come from `INPUT_*` environment variables, log lines and workflow
/// commands go to `out`, outputs and summaries to the files named by
/// `GITHUB_OUTPUT` and `GITHUB_STEP_SUMMARY`.
pub struct GithubActions<W: Write = io::Stdout> {
    out: W,
    inputs: HashMap<String, String>,
    output_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
}

impl GithubActions<io::Stdout> {
    /// Create a platform from the current process environment
    pub fn from_env() -> Self {
        Self::with_writer(
            io::stdout(),
            std::env::var_os(OUTPUT_FILE_ENV).map(PathBuf::from),
            std::env::var_os(SUMMARY_FILE_ENV).map(PathBuf::from),
        )
    }

    /// Whether the process runs inside a GitHub Actions job
    pub fn is_available() -> bool {
        std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
    }
}

impl<W: Write> GithubActions<W> {
    /// Create a platform writing log lines to `out`
    pub fn with_writer(out: W, output_file: Option<PathBuf>, summary_file: Option<PathBuf>) -> Self {
        GithubActions {
            out,
            inputs: HashMap::new(),
            output_file,
            summary_file,
        }
    }

    /// Override an input, taking precedence over the environment
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Consume the platform, returning the log writer
    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> ActionsPlatform for GithubActions<W> {
    fn get_input(&self, name: &str) -> Result<String> {
        Ok(input_from_env(&self.inputs, name))
    }

    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "::warning::{}", escape_data(message))?;
        Ok(())
    }

    fn set_output(&mut self, name: &str, value: &OutputValue) -> Result<()> {
        let value = value.to_command_value()?;
        match &self.output_file {
            Some(path) => {
                let entry = file_command_entry(name, &value, &file_command_delimiter())?;
                append_to_file(path, &entry)
            }
            None => {
                writeln!(self.out)?;
                writeln!(
                    self.out,
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(&value)
                )?;
                Ok(())
            }
        }
    }

    fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        let path = self.summary_file.as_ref().ok_or_else(|| {
            ChangesetCheckError::output(format!(
                "Unable to find environment variable for ${}. Check if your runtime environment supports job summaries.",
                SUMMARY_FILE_ENV
            ))
        })?;
        append_to_file(path, &summary.to_html())
    }
}
