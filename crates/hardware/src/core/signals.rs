//! Stage input and output bundles.
//!
//! These are the values carried by the stage's ports during one evaluation.
//! The harness owns the wires; the stage only ever sees these snapshots.

use serde::Serialize;

use crate::isa::instruction::DecodeResult;

/// Externally driven control lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageControl {
    /// Synchronous reset; overrides everything else.
    pub reset: bool,
    /// Decode enable; while low the outputs hold.
    pub enable: bool,
    /// Fetch arbiter reports it cannot take more work.
    pub arbiter_full: bool,
}

/// Everything the stage reads in one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageInputs {
    /// Instruction word from the fetch arbiter.
    pub word: u32,
    /// Control lines.
    pub control: StageControl,
}

impl StageInputs {
    /// Inputs for an enabled, out-of-reset stage presented with `word`.
    pub const fn running(word: u32) -> Self {
        Self {
            word,
            control: StageControl {
                reset: false,
                enable: true,
                arbiter_full: false,
            },
        }
    }
}

/// Everything the stage drives in one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageOutputs {
    /// Classification of the current (or held) word.
    pub decode: DecodeResult,
    /// Backpressure toward the fetch arbiter.
    pub stall_fetch: bool,
}

impl StageOutputs {
    /// Outputs driven while in reset.
    pub const RESET: Self = Self {
        decode: DecodeResult::NEUTRAL,
        stall_fetch: false,
    };
}
