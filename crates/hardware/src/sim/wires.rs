//! The harness wiring.
//!
//! Wires are grouped by driver: the clock owns `clk`, the stimulus owns the
//! stage inputs and the stage owns its outputs. Each process only receives a
//! mutable borrow of its own group, so a second writer cannot be expressed.

use crate::core::signals::{StageControl, StageInputs, StageOutputs};
use crate::isa::instruction::{DecodeResult, OutputFlags};

use super::signal::{ChangeSet, Signal, SignalId, TraceValue};

/// Stage inputs, written only by the stimulus driver.
#[derive(Clone, Debug)]
pub struct InputWires {
    /// Reset.
    pub rst: Signal<bool>,
    /// Enable.
    pub en: Signal<bool>,
    /// Instruction word.
    pub instr: Signal<u32>,
    /// Arbiter full.
    pub arb_full_mask: Signal<bool>,
}

impl InputWires {
    fn new() -> Self {
        Self {
            rst: Signal::new(SignalId::Rst, false),
            en: Signal::new(SignalId::En, false),
            instr: Signal::new(SignalId::Instr, 0),
            arb_full_mask: Signal::new(SignalId::ArbFullMask, false),
        }
    }

    /// Committed values as seen by the stage.
    pub fn snapshot(&self) -> StageInputs {
        StageInputs {
            word: self.instr.read(),
            control: self.control(),
        }
    }

    /// Committed control lines.
    pub fn control(&self) -> StageControl {
        StageControl {
            reset: self.rst.read(),
            enable: self.en.read(),
            arbiter_full: self.arb_full_mask.read(),
        }
    }

    fn commit(&mut self, changes: &mut ChangeSet) {
        self.rst.commit(changes);
        self.en.commit(changes);
        self.instr.commit(changes);
        self.arb_full_mask.commit(changes);
    }
}

/// Stage outputs, written only by the Identify stage.
#[derive(Clone, Debug)]
pub struct OutputWires {
    /// Primary opcode slice.
    pub instr_prefix: Signal<u32>,
    /// Full word.
    pub instr_suffix: Signal<u32>,
    /// Branch identified.
    pub branch_identified: Signal<bool>,
    /// I-form branch.
    pub branch_i_form: Signal<bool>,
    /// B-form branch.
    pub branch_b_form: Signal<bool>,
    /// Target from LR.
    pub branch_cond_lr: Signal<bool>,
    /// Target from CTR.
    pub branch_cond_ctr: Signal<bool>,
    /// Target from TAR.
    pub branch_cond_tar: Signal<bool>,
    /// Stall toward the fetch arbiter.
    pub stall_fetch_arb: Signal<bool>,
    /// Condition register instruction identified.
    pub condreg_identified: Signal<bool>,
    /// One wire per condition register operation.
    pub condreg_ops: [Signal<bool>; 9],
    /// Prefix opcode seen.
    pub dbg_is_prefixed: Signal<bool>,
}

impl OutputWires {
    fn new() -> Self {
        Self {
            instr_prefix: Signal::new(SignalId::InstrPrefix, 0),
            instr_suffix: Signal::new(SignalId::InstrSuffix, 0),
            branch_identified: Signal::new(SignalId::BranchIdentified, false),
            branch_i_form: Signal::new(SignalId::BranchIForm, false),
            branch_b_form: Signal::new(SignalId::BranchBForm, false),
            branch_cond_lr: Signal::new(SignalId::BranchCondLr, false),
            branch_cond_ctr: Signal::new(SignalId::BranchCondCtr, false),
            branch_cond_tar: Signal::new(SignalId::BranchCondTar, false),
            stall_fetch_arb: Signal::new(SignalId::StallFetchArb, false),
            condreg_identified: Signal::new(SignalId::CondRegIdentified, false),
            condreg_ops: SignalId::CONDREG_OPS.map(|id| Signal::new(id, false)),
            dbg_is_prefixed: Signal::new(SignalId::DbgIsPrefixed, false),
        }
    }

    /// Schedules every output wire from one stage evaluation.
    pub fn drive(&mut self, outputs: &StageOutputs) {
        let decode = &outputs.decode;
        let flags = decode.flags();
        self.instr_prefix.write(decode.instr_prefix());
        self.instr_suffix.write(decode.instr_suffix());
        self.branch_identified.write(flags.branch_identified);
        self.branch_i_form.write(flags.branch_i_form);
        self.branch_b_form.write(flags.branch_b_form);
        self.branch_cond_lr.write(flags.branch_cond_lr);
        self.branch_cond_ctr.write(flags.branch_cond_ctr);
        self.branch_cond_tar.write(flags.branch_cond_tar);
        self.stall_fetch_arb.write(outputs.stall_fetch);
        self.condreg_identified.write(flags.condreg_identified);
        for (wire, set) in self.condreg_ops.iter_mut().zip(flags.condreg_ops) {
            wire.write(set);
        }
        self.dbg_is_prefixed.write(flags.prefixed);
    }

    /// Committed flags.
    pub fn flags(&self) -> OutputFlags {
        OutputFlags {
            branch_identified: self.branch_identified.read(),
            branch_i_form: self.branch_i_form.read(),
            branch_b_form: self.branch_b_form.read(),
            branch_cond_lr: self.branch_cond_lr.read(),
            branch_cond_ctr: self.branch_cond_ctr.read(),
            branch_cond_tar: self.branch_cond_tar.read(),
            condreg_identified: self.condreg_identified.read(),
            condreg_ops: self.condreg_ops.each_ref().map(Signal::read),
            prefixed: self.dbg_is_prefixed.read(),
        }
    }

    /// Committed outputs folded back into a decode result.
    ///
    /// `None` means the wires carry a combination the decoder never drives.
    pub fn decode(&self) -> Option<DecodeResult> {
        DecodeResult::from_flags(
            &self.flags(),
            self.instr_prefix.read(),
            self.instr_suffix.read(),
        )
    }

    fn commit(&mut self, changes: &mut ChangeSet) {
        self.instr_prefix.commit(changes);
        self.instr_suffix.commit(changes);
        self.branch_identified.commit(changes);
        self.branch_i_form.commit(changes);
        self.branch_b_form.commit(changes);
        self.branch_cond_lr.commit(changes);
        self.branch_cond_ctr.commit(changes);
        self.branch_cond_tar.commit(changes);
        self.stall_fetch_arb.commit(changes);
        self.condreg_identified.commit(changes);
        for wire in &mut self.condreg_ops {
            wire.commit(changes);
        }
        self.dbg_is_prefixed.commit(changes);
    }
}

/// Every wire of the harness.
#[derive(Clone, Debug)]
pub struct Wires {
    /// Clock, written only by the clock generator.
    pub clk: Signal<bool>,
    /// Stage inputs.
    pub inputs: InputWires,
    /// Stage outputs.
    pub outputs: OutputWires,
}

impl Default for Wires {
    fn default() -> Self {
        Self::new()
    }
}

impl Wires {
    /// All wires low, the word zero.
    pub fn new() -> Self {
        Self {
            clk: Signal::new(SignalId::Clk, false),
            inputs: InputWires::new(),
            outputs: OutputWires::new(),
        }
    }

    /// Applies every pending write and returns the set of wires that moved.
    pub fn commit(&mut self) -> ChangeSet {
        let mut changes = ChangeSet::EMPTY;
        self.clk.commit(&mut changes);
        self.inputs.commit(&mut changes);
        self.outputs.commit(&mut changes);
        changes
    }

    /// Committed value of one wire.
    pub fn value(&self, id: SignalId) -> TraceValue {
        let i = &self.inputs;
        let o = &self.outputs;
        match id {
            SignalId::Clk => self.clk.trace_value(),
            SignalId::Rst => i.rst.trace_value(),
            SignalId::En => i.en.trace_value(),
            SignalId::Instr => i.instr.trace_value(),
            SignalId::ArbFullMask => i.arb_full_mask.trace_value(),
            SignalId::InstrPrefix => o.instr_prefix.trace_value(),
            SignalId::InstrSuffix => o.instr_suffix.trace_value(),
            SignalId::BranchIdentified => o.branch_identified.trace_value(),
            SignalId::BranchIForm => o.branch_i_form.trace_value(),
            SignalId::BranchBForm => o.branch_b_form.trace_value(),
            SignalId::BranchCondLr => o.branch_cond_lr.trace_value(),
            SignalId::BranchCondCtr => o.branch_cond_ctr.trace_value(),
            SignalId::BranchCondTar => o.branch_cond_tar.trace_value(),
            SignalId::StallFetchArb => o.stall_fetch_arb.trace_value(),
            SignalId::CondRegIdentified => o.condreg_identified.trace_value(),
            SignalId::CondRegCrand => o.condreg_ops[0].trace_value(),
            SignalId::CondRegCrnand => o.condreg_ops[1].trace_value(),
            SignalId::CondRegCror => o.condreg_ops[2].trace_value(),
            SignalId::CondRegCrxor => o.condreg_ops[3].trace_value(),
            SignalId::CondRegCrnor => o.condreg_ops[4].trace_value(),
            SignalId::CondRegCreqv => o.condreg_ops[5].trace_value(),
            SignalId::CondRegCrandc => o.condreg_ops[6].trace_value(),
            SignalId::CondRegCrorc => o.condreg_ops[7].trace_value(),
            SignalId::CondRegMcrf => o.condreg_ops[8].trace_value(),
            SignalId::DbgIsPrefixed => o.dbg_is_prefixed.trace_value(),
        }
    }
}
