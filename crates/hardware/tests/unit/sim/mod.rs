//! # Harness Unit Tests


/// JSON-lines export of observations.
pub mod events;



/// VCD output.
pub mod trace;
