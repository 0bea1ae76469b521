//! Discrete-event harness around the Identify stage.
//!
//! Provides the signal layer, the clock and stimulus processes, the output
//! observer, the waveform writer, and the scheduler that ties them together.

pub mod clock;
pub mod observer;
pub mod signal;
pub mod simulator;
pub mod source;
pub mod stimulus;
pub mod trace;
pub mod wires;

pub use self::simulator::{Simulator, StepOutcome};
