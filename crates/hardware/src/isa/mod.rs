//! Instruction Set Architecture (ISA) definitions for the Identify stage.
//!
//! Covers the subset of the Power ISA the front end classifies: branches
//! (I-form, B-form, XL-form to LR/CTR/TAR) and condition register
//! logical/move instructions.

/// Table-driven instruction classification.
pub mod decode;

/// Instruction disassembler for log lines and diagnostics.
pub mod disasm;

/// Encoders for the recognized instruction formats.
pub mod encode;

/// Field extraction and the decode result type.
pub mod instruction;

/// Primary and extended opcode constants.
pub mod opcodes;
