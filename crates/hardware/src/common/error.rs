//! Harness failure definitions.
//!
//! The decoder and the Identify stage are total: every 32-bit word classifies,
//! possibly as "unrecognized", and no control combination is rejected. Only the
//! surrounding harness can fail. This module provides:
//! 1. **Failure Taxonomy:** Trace and export I/O, stimulus exhaustion, scheduler limits, configuration.
//! 2. **Attribution:** Every failure names the harness component that caused it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::time::SimTime;

/// Harness component responsible for a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    /// The waveform trace writer.
    Trace,
    /// The stimulus driver or its instruction source.
    Stimulus,
    /// The discrete-event scheduler.
    Scheduler,
    /// Configuration loading and validation.
    Config,
    /// The JSON-lines observation export.
    Events,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Stimulus => "stimulus",
            Self::Scheduler => "scheduler",
            Self::Config => "config",
            Self::Events => "events",
        };
        f.write_str(name)
    }
}

/// Fatal simulation-harness failures.
///
/// Any of these aborts the run; the CLI reports [`SimError::component`] and
/// exits with a non-zero status.
#[derive(Debug, Error)]
pub enum SimError {
    /// The trace file could not be created.
    #[error("cannot create trace file {path}: {source}")]
    TraceOpen {
        /// Requested trace path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing to an open trace failed.
    #[error("trace write failed at {time}: {source}")]
    TraceWrite {
        /// Simulated time of the failed write.
        time: SimTime,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The instruction source ran dry before the configured cycle count.
    #[error("instruction source exhausted after {issued} of {expected} words without a stop")]
    StimulusExhausted {
        /// Words presented before the source ran dry.
        issued: u64,
        /// Words the stimulus was configured to present.
        expected: u64,
    },

    /// Simulated time passed the configured limit before the stimulus stopped the run.
    #[error("no stop request before the {limit} time limit")]
    TimeLimit {
        /// Configured limit.
        limit: SimTime,
    },

    /// The event queue drained without a stop request.
    #[error("event queue drained at {time} without a stop request")]
    Starved {
        /// Time of the last processed event.
        time: SimTime,
    },

    /// Combinational evaluation did not reach a fixed point.
    #[error("signals still changing at {time} after {rounds} delta rounds")]
    DeltaOverflow {
        /// Instant that failed to settle.
        time: SimTime,
        /// Delta rounds attempted.
        rounds: usize,
    },

    /// The observation export could not be written.
    #[error("cannot write events to {path}: {source}")]
    EventsWrite {
        /// Requested export path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read.
    #[error("cannot read configuration {path}: {source}")]
    ConfigIo {
        /// Configuration path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration document did not deserialize.
    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),
}

impl SimError {
    /// Returns the harness component that failed.
    pub const fn component(&self) -> Component {
        match self {
            Self::TraceOpen { .. } | Self::TraceWrite { .. } => Component::Trace,
            Self::StimulusExhausted { .. } | Self::TimeLimit { .. } => Component::Stimulus,
            Self::Starved { .. } | Self::DeltaOverflow { .. } => Component::Scheduler,
            Self::ConfigIo { .. } | Self::ConfigParse(_) | Self::ConfigInvalid(_) => {
                Component::Config
            }
            Self::EventsWrite { .. } => Component::Events,
        }
    }
}
