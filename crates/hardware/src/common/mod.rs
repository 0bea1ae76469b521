//! Common types shared by the decoder, the stage model and the harness.
//!
//! This module provides:
//! 1. **Simulated Time:** A strong picosecond time type for the event scheduler.
//! 2. **Error Handling:** The harness failure taxonomy and the component that failed.

/// Error types and harness component identification.
pub mod error;

/// Simulated time representation.
pub mod time;

pub use error::{Component, SimError};
pub use time::SimTime;
