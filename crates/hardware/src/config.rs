//! Configuration system for the Identify stage harness.
//!
//! This module defines all configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** The timing of the reference stimulus (10 ns clock, 12 ns reset, 3 ns settle, 7 ns fetch).
//! 2. **Structures:** General, clock, stimulus and trace sections.
//! 3. **Sources:** The pluggable instruction word source.
//!
//! Configuration is supplied as JSON or built with `Config::default()` for the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the harness.
mod defaults {
    /// Clock period in picoseconds (10 ns).
    pub const CLOCK_PERIOD_PS: u64 = 10_000;

    /// Reset pulse length in picoseconds (12 ns).
    pub const RESET_PS: u64 = 12_000;

    /// Delay between releasing reset and asserting enable (3 ns).
    pub const SETTLE_PS: u64 = 3_000;

    /// Delay after each rising edge before the cache returns a word (7 ns).
    pub const FETCH_DELAY_PS: u64 = 7_000;

    /// Number of instruction words presented.
    pub const CYCLES: u64 = 100;

    /// Delta rounds allowed per instant before the scheduler gives up.
    pub const MAX_DELTA_ROUNDS: usize = 64;

    /// Seed of the random instruction source.
    pub const SEED: u64 = 0x1d_e7_1f_00;

    /// Trace file written once per run.
    pub const TRACE_PATH: &str = "trace.vcd";
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use identify_core::config::{Config, SourceConfig};
///
/// let json = r#"{
///     "clock": { "period_ps": 4000 },
///     "stimulus": {
///         "cycles": 2,
///         "source": { "kind": "Fixed", "words": [1289957762, 0] }
///     },
///     "trace": { "enabled": false }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.clock.period_ps, 4000);
/// assert_eq!(config.stimulus.reset_ps, 12_000);
/// assert!(matches!(config.stimulus.source, SourceConfig::Fixed { .. }));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Scheduler limits and logging.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock source.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Stimulus sequence.
    #[serde(default)]
    pub stimulus: StimulusConfig,
    /// Waveform trace.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigParse`] for malformed JSON, [`SimError::ConfigInvalid`]
    /// for values the scheduler cannot run with.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigIo`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Rejects values the scheduler cannot run with.
    ///
    /// # Errors
    ///
    /// [`SimError::ConfigInvalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.clock.period_ps < 2 {
            return Err(SimError::ConfigInvalid(format!(
                "clock period must be at least 2 ps, got {}",
                self.clock.period_ps
            )));
        }
        if self.general.max_delta_rounds == 0 {
            return Err(SimError::ConfigInvalid(
                "max_delta_rounds must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scheduler limits and logging options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Abort if the stimulus has not stopped the run by this time.
    #[serde(default)]
    pub max_time_ps: Option<u64>,

    /// Delta rounds allowed per instant.
    #[serde(default = "GeneralConfig::default_max_delta_rounds")]
    pub max_delta_rounds: usize,

    /// Log every observation at `info` level.
    #[serde(default = "GeneralConfig::default_log_observations")]
    pub log_observations: bool,

    /// Keep every observation in memory for a later export.
    #[serde(default)]
    pub keep_observations: bool,
}

impl GeneralConfig {
    fn default_max_delta_rounds() -> usize {
        defaults::MAX_DELTA_ROUNDS
    }

    fn default_log_observations() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_time_ps: None,
            max_delta_rounds: defaults::MAX_DELTA_ROUNDS,
            log_observations: true,
            keep_observations: false,
        }
    }
}

/// Clock source parameters. The clock has a 50% duty cycle and rises at t = 0.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Full clock period in picoseconds.
    #[serde(default = "ClockConfig::default_period_ps")]
    pub period_ps: u64,
}

impl ClockConfig {
    fn default_period_ps() -> u64 {
        defaults::CLOCK_PERIOD_PS
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_ps: defaults::CLOCK_PERIOD_PS,
        }
    }
}

/// Stimulus sequence timing and word source.
#[derive(Debug, Clone, Deserialize)]
pub struct StimulusConfig {
    /// Length of the initial reset pulse.
    #[serde(default = "StimulusConfig::default_reset_ps")]
    pub reset_ps: u64,

    /// Delay between reset release and enable.
    #[serde(default = "StimulusConfig::default_settle_ps")]
    pub settle_ps: u64,

    /// Delay after each rising edge before a word is presented.
    #[serde(default = "StimulusConfig::default_fetch_delay_ps")]
    pub fetch_delay_ps: u64,

    /// Number of words presented before the stimulus stops the run.
    #[serde(default = "StimulusConfig::default_cycles")]
    pub cycles: u64,

    /// Assert the arbiter-full line on every Nth word (0 = never).
    #[serde(default)]
    pub arbiter_full_every: u64,

    /// Where instruction words come from.
    #[serde(default)]
    pub source: SourceConfig,
}

impl StimulusConfig {
    fn default_reset_ps() -> u64 {
        defaults::RESET_PS
    }

    fn default_settle_ps() -> u64 {
        defaults::SETTLE_PS
    }

    fn default_fetch_delay_ps() -> u64 {
        defaults::FETCH_DELAY_PS
    }

    fn default_cycles() -> u64 {
        defaults::CYCLES
    }
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            reset_ps: defaults::RESET_PS,
            settle_ps: defaults::SETTLE_PS,
            fetch_delay_ps: defaults::FETCH_DELAY_PS,
            cycles: defaults::CYCLES,
            arbiter_full_every: 0,
            source: SourceConfig::default(),
        }
    }
}

/// Instruction word source selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum SourceConfig {
    /// Seeded random words biased toward the decode table.
    Random {
        /// Generator seed.
        #[serde(default = "SourceConfig::default_seed")]
        seed: u64,
    },
    /// A fixed list of words, presented in order.
    Fixed {
        /// The words.
        words: Vec<u32>,
    },
}

impl SourceConfig {
    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Random {
            seed: defaults::SEED,
        }
    }
}

/// Waveform trace output.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Write a trace at all.
    #[serde(default = "TraceConfig::default_enabled")]
    pub enabled: bool,

    /// Output path of the VCD file.
    #[serde(default = "TraceConfig::default_path")]
    pub path: PathBuf,
}

impl TraceConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_path() -> PathBuf {
        PathBuf::from(defaults::TRACE_PATH)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(defaults::TRACE_PATH),
        }
    }
}
