use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Hard ceiling on the step bound, so a misconfigured caller cannot request
/// unbounded work.
pub const MAX_STEPS_CEILING: u64 = 1_000_000;

/// Runtime options for the simulator. Fields left out of a config file keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Step bound per run; the only cancellation mechanism the engine has.
    pub max_steps: u64,
    /// Longest input word the surrounding system accepts.
    pub max_input_length: usize,
    /// Whether runs record their configuration trace.
    pub record_trace: bool,
    pub logger: LoggerConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_steps: 10_000,
            max_input_length: 10_000,
            record_trace: true,
            logger: LoggerConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Loads a TOML config file, or the defaults when no path is given.
    pub fn from_optional_file(path: Option<String>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file '{}'", path))?;
                toml::from_str(&content)
                    .with_context(|| format!("failed to parse config file '{}'", path))
            }
            None => Ok(SimulatorConfig::default()),
        }
    }

    /// The step bound the engine actually uses: at least one step, at most
    /// [MAX_STEPS_CEILING].
    pub fn effective_max_steps(&self) -> u64 {
        self.max_steps.clamp(1, MAX_STEPS_CEILING)
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_record_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub log_file: bool,
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}
