//! Power ISA Identify stage simulator library.
//!
//! This crate models the instruction-identification stage of a Power ISA
//! front end and the harness that exercises it:
//! 1. **ISA:** Field extraction, the decode table, encoders, and a disassembler.
//! 2. **Core:** The Identify stage with its reset, enable, and stall semantics.
//! 3. **Simulation:** Signals, clock, stimulus, observer, VCD trace, and the event scheduler.
//! 4. **Support:** Configuration, errors, statistics, and functional coverage.

/// Common types (simulated time, errors).
pub mod common;
/// Harness configuration (defaults, hierarchical config structures).
pub mod config;
/// The Identify stage and its port bundles.
pub mod core;
/// Instruction set (fields, opcodes, decode table, encoders, disassembler).
pub mod isa;
/// Discrete-event harness (signals, processes, trace, scheduler).
pub mod sim;
/// Run statistics and functional coverage.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The stage under test.
pub use crate::core::IdentifyStage;
/// Pure decode function.
pub use crate::isa::decode::decode;
/// Classification of one word.
pub use crate::isa::instruction::DecodeResult;
/// Top-level harness.
pub use crate::sim::Simulator;
