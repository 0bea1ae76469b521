//! Instruction field extraction and the decode result.
//!
//! Bit numbering follows the Power ISA: bit 0 is the most significant bit of the
//! 32-bit word, so a field occupying ISA bits `a..=b` sits at shift `31 - b`.

use std::fmt;

use serde::Serialize;

/// Bit mask for the primary opcode once shifted down (ISA bits 0-5).
pub const PO_MASK: u32 = 0x3F;
/// Shift of the primary opcode field.
pub const PO_SHIFT: u32 = 26;
/// Bit mask for a 5-bit operand field (BO, BI, BT, BA, BB).
pub const FIELD5_MASK: u32 = 0x1F;
/// Bit mask for a 3-bit condition register field selector (BF, BFA).
pub const FIELD3_MASK: u32 = 0x7;
/// Bit mask for the XL-form extended opcode once shifted down (ISA bits 21-30).
pub const XL_XO_MASK: u32 = 0x3FF;
/// Shift of the XL-form extended opcode field.
pub const XL_XO_SHIFT: u32 = 1;
/// In-place mask of the I-form LI field with its two implied zero bits.
pub const LI_FIELD_MASK: u32 = 0x03FF_FFFC;
/// In-place mask of the B-form BD field with its two implied zero bits.
pub const BD_FIELD_MASK: u32 = 0x0000_FFFC;

/// Trait for extracting Power ISA instruction fields from encoded words.
pub trait InstructionBits {
    /// Extracts the primary opcode (ISA bits 0-5).
    fn primary_opcode(&self) -> u32;

    /// Extracts the XL-form extended opcode (ISA bits 21-30).
    fn xl_xo(&self) -> u32;

    /// Extracts the BO field (ISA bits 6-10), also BT for condition register logicals.
    fn bo(&self) -> u32;

    /// Extracts the BI field (ISA bits 11-15), also BA for condition register logicals.
    fn bi(&self) -> u32;

    /// Extracts the BB field (ISA bits 16-20).
    fn bb(&self) -> u32;

    /// Extracts the BH branch hint (ISA bits 19-20).
    fn bh(&self) -> u32;

    /// Extracts the BF field of `mcrf` (ISA bits 6-8).
    fn bf(&self) -> u32;

    /// Extracts the BFA field of `mcrf` (ISA bits 11-13).
    fn bfa(&self) -> u32;

    /// Absolute-address bit (ISA bit 30).
    fn aa(&self) -> bool;

    /// Link bit (ISA bit 31).
    fn lk(&self) -> bool;

    /// Sign-extended I-form displacement in bytes (`LI || 0b00`).
    fn li_displacement(&self) -> i32;

    /// Sign-extended B-form displacement in bytes (`BD || 0b00`).
    fn bd_displacement(&self) -> i32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn primary_opcode(&self) -> u32 {
        (self >> PO_SHIFT) & PO_MASK
    }

    #[inline(always)]
    fn xl_xo(&self) -> u32 {
        (self >> XL_XO_SHIFT) & XL_XO_MASK
    }

    #[inline(always)]
    fn bo(&self) -> u32 {
        (self >> 21) & FIELD5_MASK
    }

    #[inline(always)]
    fn bi(&self) -> u32 {
        (self >> 16) & FIELD5_MASK
    }

    #[inline(always)]
    fn bb(&self) -> u32 {
        (self >> 11) & FIELD5_MASK
    }

    #[inline(always)]
    fn bh(&self) -> u32 {
        (self >> 11) & 0x3
    }

    #[inline(always)]
    fn bf(&self) -> u32 {
        (self >> 23) & FIELD3_MASK
    }

    #[inline(always)]
    fn bfa(&self) -> u32 {
        (self >> 18) & FIELD3_MASK
    }

    #[inline(always)]
    fn aa(&self) -> bool {
        (self >> 1) & 1 == 1
    }

    #[inline(always)]
    fn lk(&self) -> bool {
        self & 1 == 1
    }

    /// The 26-bit field is shifted to the top of the word and arithmetically
    /// shifted back to sign-extend it.
    #[inline(always)]
    fn li_displacement(&self) -> i32 {
        (((self & LI_FIELD_MASK) << 6) as i32) >> 6
    }

    #[inline(always)]
    fn bd_displacement(&self) -> i32 {
        (((self & BD_FIELD_MASK) << 16) as i32) >> 16
    }
}

/// Branch sub-encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BranchForm {
    /// Not a branch.
    #[default]
    None,
    /// Unconditional branch with an immediate target.
    IForm,
    /// Conditional branch.
    BForm,
}

/// Register that supplies the target of a conditional branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BranchCondition {
    /// No register-sourced target.
    #[default]
    None,
    /// Link register (`bclr`).
    Lr,
    /// Count register (`bcctr`).
    Ctr,
    /// Branch target address register (`bctar`).
    Tar,
}

/// Condition register logical or move operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CondRegOp {
    /// Not a condition register instruction.
    #[default]
    None,
    /// `crand`
    Crand,
    /// `crnand`
    Crnand,
    /// `cror`
    Cror,
    /// `crxor`
    Crxor,
    /// `crnor`
    Crnor,
    /// `creqv`
    Creqv,
    /// `crandc`
    Crandc,
    /// `crorc`
    Crorc,
    /// `mcrf`
    Mcrf,
}

impl CondRegOp {
    /// Every operation the decoder can report, in output-port order.
    pub const ALL: [Self; 9] = [
        Self::Crand,
        Self::Crnand,
        Self::Cror,
        Self::Crxor,
        Self::Crnor,
        Self::Creqv,
        Self::Crandc,
        Self::Crorc,
        Self::Mcrf,
    ];

    /// Assembler mnemonic, empty for [`CondRegOp::None`].
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Crand => "crand",
            Self::Crnand => "crnand",
            Self::Cror => "cror",
            Self::Crxor => "crxor",
            Self::Crnor => "crnor",
            Self::Creqv => "creqv",
            Self::Crandc => "crandc",
            Self::Crorc => "crorc",
            Self::Mcrf => "mcrf",
        }
    }
}

impl fmt::Display for BranchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "-",
            Self::IForm => "I-form",
            Self::BForm => "B-form",
        })
    }
}

impl fmt::Display for BranchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "-",
            Self::Lr => "LR",
            Self::Ctr => "CTR",
            Self::Tar => "TAR",
        })
    }
}

impl fmt::Display for CondRegOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("-"),
            op => f.write_str(op.mnemonic()),
        }
    }
}

/// Structured classification of one instruction word.
///
/// Fields are private so that only the decoder can produce a value: when an
/// identification flag is false its dependent enum is `None`, and the branch
/// and condition register flags are never set together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DecodeResult {
    branch_identified: bool,
    branch_form: BranchForm,
    branch_condition: BranchCondition,
    condreg_identified: bool,
    condreg_op: CondRegOp,
    prefixed: bool,
    instr_prefix: u32,
    instr_suffix: u32,
}

impl DecodeResult {
    /// The all-false, all-`None` value driven while the stage is in reset.
    pub const NEUTRAL: Self = Self {
        branch_identified: false,
        branch_form: BranchForm::None,
        branch_condition: BranchCondition::None,
        condreg_identified: false,
        condreg_op: CondRegOp::None,
        prefixed: false,
        instr_prefix: 0,
        instr_suffix: 0,
    };

    /// An unclassified result carrying the trace slices of `word`.
    pub(crate) fn unrecognized(word: u32) -> Self {
        Self {
            prefixed: word.primary_opcode() == super::opcodes::PO_PREFIX,
            instr_prefix: word.primary_opcode(),
            instr_suffix: word,
            ..Self::NEUTRAL
        }
    }

    /// Marks the result as a branch of the given form and condition source.
    pub(crate) fn with_branch(mut self, form: BranchForm, condition: BranchCondition) -> Self {
        self.branch_identified = true;
        self.branch_form = form;
        self.branch_condition = condition;
        self
    }

    /// Marks the result as a condition register instruction.
    pub(crate) fn with_condreg(mut self, op: CondRegOp) -> Self {
        self.condreg_identified = true;
        self.condreg_op = op;
        self
    }

    /// Rebuilds a result from its signal-level view.
    ///
    /// Returns `None` if the flags are not a combination the decoder can
    /// produce (for example two condition register operations at once).
    pub fn from_flags(flags: &OutputFlags, instr_prefix: u32, instr_suffix: u32) -> Option<Self> {
        let form = match (flags.branch_i_form, flags.branch_b_form) {
            (false, false) => BranchForm::None,
            (true, false) => BranchForm::IForm,
            (false, true) => BranchForm::BForm,
            (true, true) => return None,
        };
        let condition = match (flags.branch_cond_lr, flags.branch_cond_ctr, flags.branch_cond_tar) {
            (false, false, false) => BranchCondition::None,
            (true, false, false) => BranchCondition::Lr,
            (false, true, false) => BranchCondition::Ctr,
            (false, false, true) => BranchCondition::Tar,
            _ => return None,
        };
        let mut ops = CondRegOp::ALL
            .iter()
            .zip(flags.condreg_ops)
            .filter_map(|(op, set)| set.then_some(*op));
        let op = ops.next().unwrap_or(CondRegOp::None);
        if ops.next().is_some() {
            return None;
        }

        let result = Self {
            branch_identified: flags.branch_identified,
            branch_form: form,
            branch_condition: condition,
            condreg_identified: flags.condreg_identified,
            condreg_op: op,
            prefixed: flags.prefixed,
            instr_prefix,
            instr_suffix,
        };
        result.is_consistent().then_some(result)
    }

    /// Checks the invariants every decoder output satisfies.
    pub fn is_consistent(&self) -> bool {
        let branch_ok = if self.branch_identified {
            self.branch_form != BranchForm::None
                && (self.branch_form == BranchForm::BForm
                    || self.branch_condition == BranchCondition::None)
        } else {
            self.branch_form == BranchForm::None && self.branch_condition == BranchCondition::None
        };
        let condreg_ok = self.condreg_identified == (self.condreg_op != CondRegOp::None);
        branch_ok && condreg_ok && !(self.branch_identified && self.condreg_identified)
    }

    /// True iff the word is a recognized branch.
    pub const fn branch_identified(&self) -> bool {
        self.branch_identified
    }

    /// Branch sub-encoding.
    pub const fn branch_form(&self) -> BranchForm {
        self.branch_form
    }

    /// Register supplying the conditional branch target.
    pub const fn branch_condition(&self) -> BranchCondition {
        self.branch_condition
    }

    /// True iff the word is a recognized condition register logical or move.
    pub const fn condreg_identified(&self) -> bool {
        self.condreg_identified
    }

    /// Condition register operation.
    pub const fn condreg_op(&self) -> CondRegOp {
        self.condreg_op
    }

    /// True iff the word carries the prefix primary opcode.
    pub const fn prefixed(&self) -> bool {
        self.prefixed
    }

    /// Primary opcode slice of the word.
    pub const fn instr_prefix(&self) -> u32 {
        self.instr_prefix
    }

    /// The full word as presented to the decoder.
    pub const fn instr_suffix(&self) -> u32 {
        self.instr_suffix
    }

    /// True when neither instruction class matched.
    pub const fn is_unrecognized(&self) -> bool {
        !self.branch_identified && !self.condreg_identified
    }

    /// Expands the result into one flag per output wire.
    pub fn flags(&self) -> OutputFlags {
        let mut condreg_ops = [false; 9];
        for (slot, op) in condreg_ops.iter_mut().zip(CondRegOp::ALL) {
            *slot = self.condreg_op == op;
        }
        OutputFlags {
            branch_identified: self.branch_identified,
            branch_i_form: self.branch_form == BranchForm::IForm,
            branch_b_form: self.branch_form == BranchForm::BForm,
            branch_cond_lr: self.branch_condition == BranchCondition::Lr,
            branch_cond_ctr: self.branch_condition == BranchCondition::Ctr,
            branch_cond_tar: self.branch_condition == BranchCondition::Tar,
            condreg_identified: self.condreg_identified,
            condreg_ops,
            prefixed: self.prefixed,
        }
    }
}

/// One-hot, signal-level view of a [`DecodeResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutputFlags {
    /// Branch identified.
    pub branch_identified: bool,
    /// Branch is I-form.
    pub branch_i_form: bool,
    /// Branch is B-form.
    pub branch_b_form: bool,
    /// Branch target from LR.
    pub branch_cond_lr: bool,
    /// Branch target from CTR.
    pub branch_cond_ctr: bool,
    /// Branch target from TAR.
    pub branch_cond_tar: bool,
    /// Condition register instruction identified.
    pub condreg_identified: bool,
    /// One flag per [`CondRegOp::ALL`] entry.
    pub condreg_ops: [bool; 9],
    /// Prefix opcode seen.
    pub prefixed: bool,
}
