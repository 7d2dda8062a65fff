use crate::error::Result;
use crate::github::{ActionsPlatform, OutputValue, Summary};
use std::collections::HashMap;

/// One recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    Info(String),
    Warning(String),
    Output(String, OutputValue),
    Summary(Summary),
}

/// In-memory platform recording every call, for testing
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    inputs: HashMap<String, String>,
    calls: Vec<PlatformCall>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an input value
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Every call, in order
    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    pub fn infos(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Info(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Warning(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Last value published under `name`
    pub fn output(&self, name: &str) -> Option<&OutputValue> {
        self.calls.iter().rev().find_map(|call| match call {
            PlatformCall::Output(key, value) if key == name => Some(value),
            _ => None,
        })
    }

    pub fn summaries(&self) -> Vec<&Summary> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Summary(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }
}

impl ActionsPlatform for RecordingPlatform {
    fn get_input(&self, name: &str) -> Result<String> {
        Ok(self.inputs.get(name).cloned().unwrap_or_default())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        self.calls.push(PlatformCall::Info(message.to_string()));
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.calls.push(PlatformCall::Warning(message.to_string()));
        Ok(())
    }

    fn set_output(&mut self, name: &str, value: &OutputValue) -> Result<()> {
        self.calls
            .push(PlatformCall::Output(name.to_string(), value.clone()));
        Ok(())
    }

    fn write_summary(&mut self, summary: &Summary) -> Result<()> {
        self.calls.push(PlatformCall::Summary(summary.clone()));
        Ok(())
    }
}
