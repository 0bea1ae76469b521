//! Identify stage model.
//!
//! This module contains the combinational front-end stage that wraps the
//! decoder with reset, enable and backpressure semantics, and the plain-value
//! signal bundles it consumes and produces.

/// The Identify stage.
pub mod identify;

/// Stage input and output bundles.
pub mod signals;

pub use self::identify::IdentifyStage;
pub use self::signals::{StageControl, StageInputs, StageOutputs};
