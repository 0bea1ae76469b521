//! Identify stage.
//!
//! Wraps the decoder with the stage's control semantics. Evaluation is
//! combinational: the harness calls [`IdentifyStage::evaluate`] in the same
//! instant as any input change and the result is visible immediately.
//!
//! Priority of the control lines:
//! 1. **Reset:** outputs are neutral and the stall is deasserted, whatever the word.
//! 2. **Enable low:** the last decode is held; the word is not looked at.
//! 3. **Running:** outputs are the decode of the current word.
//!
//! The stall toward the fetch arbiter mirrors `arbiter_full` outside reset,
//! independent of the decode outcome and of enable. The stage adds no
//! backpressure of its own.

use tracing::trace;

use crate::core::signals::{StageInputs, StageOutputs};
use crate::isa::decode::decode;
use crate::isa::instruction::DecodeResult;

/// The Identify stage.
///
/// The only state is the decode held while the stage is disabled.
#[derive(Clone, Debug, Default)]
pub struct IdentifyStage {
    held: DecodeResult,
    evaluations: u64,
}

impl IdentifyStage {
    /// Creates a stage whose held decode is neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the outputs from the current inputs.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Snapshot of the stage's input ports.
    pub fn evaluate(&mut self, inputs: &StageInputs) -> StageOutputs {
        self.evaluations += 1;
        let control = inputs.control;

        if control.reset {
            self.held = DecodeResult::NEUTRAL;
            return StageOutputs::RESET;
        }

        if control.enable {
            self.held = decode(inputs.word);
            trace!(word = format_args!("{:#010x}", inputs.word), decode = ?self.held, "identify");
        }

        StageOutputs {
            decode: self.held,
            stall_fetch: control.arbiter_full,
        }
    }

    /// Decode currently driven (or held) by the stage.
    pub const fn held(&self) -> &DecodeResult {
        &self.held
    }

    /// Number of evaluations since construction.
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
