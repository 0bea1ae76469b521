//! # Unit Components
//!
//! Groups the tests by crate module: shared types, ISA decoding, the stage,
//! the harness, configuration, and statistics.


/// Unit tests for configuration loading and validation.
pub mod config;



/// Unit tests for the discrete-event harness.
pub mod sim;

/// Unit tests for run statistics and coverage.
pub mod stats;
