//! Identify decoder.
//!
//! Classifies a 32-bit Power ISA word as a branch, a condition register
//! logical/move, or neither. Classification is a static mask/pattern table so
//! that the set of recognized encodings can be audited in one place:
//!
//! 1. **Primary opcode:** every rule constrains ISA bits 0-5.
//! 2. **Extended opcode:** rules for primary opcode 19 also constrain ISA bits 21-30.
//! 3. **Operands:** never examined; AA, LK, BO/BI/BH and reserved bits are ignored.
//!
//! The decoder is total. Words that match no rule are reported as
//! unrecognized, which is not an error.

use crate::isa::instruction::{BranchCondition, BranchForm, CondRegOp, DecodeResult};
use crate::isa::opcodes::{
    PO_B, PO_BC, PO_XL, XO_BCCTR, XO_BCLR, XO_BCTAR, XO_CRAND, XO_CRANDC, XO_CREQV, XO_CRNAND,
    XO_CRNOR, XO_CROR, XO_CRORC, XO_CRXOR, XO_MCRF,
};

/// In-place mask of the primary opcode (ISA bits 0-5).
pub const PO_FIELD: u32 = 0xFC00_0000;

/// In-place mask of the primary opcode plus the XL-form extended opcode.
pub const XL_FIELD: u32 = PO_FIELD | 0x0000_07FE;

/// Union of every bit any table rule examines.
pub const RELEVANT_BITS: u32 = XL_FIELD;

/// Result of a table match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionClass {
    /// Branch with its form and target register.
    Branch {
        /// Branch sub-encoding; never [`BranchForm::None`] in the table.
        form: BranchForm,
        /// Target register for branch-to-register forms.
        condition: BranchCondition,
    },
    /// Condition register logical or move.
    CondReg(CondRegOp),
}

/// One entry of the decode table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeRule {
    /// Assembler mnemonic of the matched instruction.
    pub mnemonic: &'static str,
    /// Bits the rule examines.
    pub mask: u32,
    /// Required value of the examined bits.
    pub pattern: u32,
    /// Classification reported on match.
    pub class: InstructionClass,
}

impl DecodeRule {
    /// Returns true if `word` carries this rule's encoding.
    #[inline(always)]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.pattern
    }
}

/// Rule matching a whole primary opcode.
const fn primary(mnemonic: &'static str, po: u32, class: InstructionClass) -> DecodeRule {
    DecodeRule {
        mnemonic,
        mask: PO_FIELD,
        pattern: po << 26,
        class,
    }
}

/// Rule matching an XL-form extended opcode under primary opcode 19.
const fn xl(mnemonic: &'static str, xo: u32, class: InstructionClass) -> DecodeRule {
    DecodeRule {
        mnemonic,
        mask: XL_FIELD,
        pattern: (PO_XL << 26) | (xo << 1),
        class,
    }
}

const fn branch(form: BranchForm, condition: BranchCondition) -> InstructionClass {
    InstructionClass::Branch { form, condition }
}

/// The decode table. Rules are disjoint, so order only matters for speed.
pub static DECODE_TABLE: [DecodeRule; 14] = [
    primary("b", PO_B, branch(BranchForm::IForm, BranchCondition::None)),
    primary("bc", PO_BC, branch(BranchForm::BForm, BranchCondition::None)),
    xl("bclr", XO_BCLR, branch(BranchForm::BForm, BranchCondition::Lr)),
    xl("bcctr", XO_BCCTR, branch(BranchForm::BForm, BranchCondition::Ctr)),
    xl("bctar", XO_BCTAR, branch(BranchForm::BForm, BranchCondition::Tar)),
    xl("crand", XO_CRAND, InstructionClass::CondReg(CondRegOp::Crand)),
    xl("crnand", XO_CRNAND, InstructionClass::CondReg(CondRegOp::Crnand)),
    xl("cror", XO_CROR, InstructionClass::CondReg(CondRegOp::Cror)),
    xl("crxor", XO_CRXOR, InstructionClass::CondReg(CondRegOp::Crxor)),
    xl("crnor", XO_CRNOR, InstructionClass::CondReg(CondRegOp::Crnor)),
    xl("creqv", XO_CREQV, InstructionClass::CondReg(CondRegOp::Creqv)),
    xl("crandc", XO_CRANDC, InstructionClass::CondReg(CondRegOp::Crandc)),
    xl("crorc", XO_CRORC, InstructionClass::CondReg(CondRegOp::Crorc)),
    xl("mcrf", XO_MCRF, InstructionClass::CondReg(CondRegOp::Mcrf)),
];

/// Finds the table rule matching `word`, if any.
#[inline]
pub fn lookup(word: u32) -> Option<&'static DecodeRule> {
    DECODE_TABLE.iter().find(|rule| rule.matches(word))
}

/// Decodes an instruction word.
///
/// Pure and total: the same word always yields the same result, and every
/// word yields one. The prefix/suffix slices are filled in even when no rule
/// matches.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction word as fetched.
pub fn decode(word: u32) -> DecodeResult {
    let result = DecodeResult::unrecognized(word);
    match lookup(word).map(|rule| rule.class) {
        Some(InstructionClass::Branch { form, condition }) => result.with_branch(form, condition),
        Some(InstructionClass::CondReg(op)) => result.with_condreg(op),
        None => result,
    }
}
