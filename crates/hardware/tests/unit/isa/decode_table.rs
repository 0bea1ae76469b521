//! Decode table cases.
//!
//! Every recognized instruction, with representative operand values, plus
//! words that share an opcode with a table entry but must not match.

use pretty_assertions::assert_eq;
use rstest::rstest;

use identify_core::isa::decode::decode;
use identify_core::isa::instruction::{BranchCondition, BranchForm, CondRegOp};
use identify_core::isa::opcodes::*;

use crate::common::builder::instruction::InstructionBuilder;

#[rstest]
#[case::b(0x4803_2BFB, BranchForm::IForm, BranchCondition::None)]
#[case::b_back(InstructionBuilder::new().b(-4).build(), BranchForm::IForm, BranchCondition::None)]
#[case::bc(0x425B_2BFA, BranchForm::BForm, BranchCondition::None)]
#[case::bclr(0x4CE4_1021, BranchForm::BForm, BranchCondition::Lr)]
#[case::bcctr(0x4CE4_1421, BranchForm::BForm, BranchCondition::Ctr)]
#[case::bctar(0x4CE4_1461, BranchForm::BForm, BranchCondition::Tar)]
#[case::blr(InstructionBuilder::new().bclr(20, 0, 0).build(), BranchForm::BForm, BranchCondition::Lr)]
#[case::bctrl(InstructionBuilder::new().bcctr(20, 0, 0).lk(true).build(), BranchForm::BForm, BranchCondition::Ctr)]
fn test_branches(#[case] word: u32, #[case] form: BranchForm, #[case] condition: BranchCondition) {
    let d = decode(word);
    assert!(d.branch_identified(), "{word:#010x}");
    assert_eq!(d.branch_form(), form);
    assert_eq!(d.branch_condition(), condition);
    assert!(!d.condreg_identified());
    assert_eq!(d.condreg_op(), CondRegOp::None);
}

#[rstest]
#[case::crand(XO_CRAND, CondRegOp::Crand)]
#[case::crnand(XO_CRNAND, CondRegOp::Crnand)]
#[case::cror(XO_CROR, CondRegOp::Cror)]
#[case::crxor(XO_CRXOR, CondRegOp::Crxor)]
#[case::crnor(XO_CRNOR, CondRegOp::Crnor)]
#[case::creqv(XO_CREQV, CondRegOp::Creqv)]
#[case::crandc(XO_CRANDC, CondRegOp::Crandc)]
#[case::crorc(XO_CRORC, CondRegOp::Crorc)]
fn test_condreg_logicals(#[case] xo: u32, #[case] op: CondRegOp) {
    for (bt, ba, bb) in [(0, 0, 0), (7, 3, 6), (31, 31, 31)] {
        let word = InstructionBuilder::new().cr(xo, bt, ba, bb).build();
        let d = decode(word);
        assert!(d.condreg_identified(), "{word:#010x}");
        assert_eq!(d.condreg_op(), op);
        assert!(!d.branch_identified());
        assert_eq!(d.branch_form(), BranchForm::None);
    }
}

#[test]
fn test_crxor_reference_word() {
    let word = InstructionBuilder::new().cr(XO_CRXOR, 7, 3, 6).build();
    assert_eq!(word, 0x4CE3_3182);
    assert_eq!(decode(word).condreg_op(), CondRegOp::Crxor);
}

#[test]
fn test_mcrf() {
    let word = InstructionBuilder::new().mcrf(7, 1).build();
    assert_eq!(word, 0x4F84_0000);
    let d = decode(word);
    assert!(d.condreg_identified());
    assert_eq!(d.condreg_op(), CondRegOp::Mcrf);
}

#[rstest]
#[case::zero(0x0000_0000)]
#[case::all_ones(0xFFFF_FFFF)]
#[case::isync(InstructionBuilder::new().po(PO_XL).xo(150).build())]
#[case::rfid(InstructionBuilder::new().po(PO_XL).xo(18).build())]
#[case::addi(InstructionBuilder::new().po(14).bt(3).ba(1).low(16).build())]
#[case::sc(InstructionBuilder::new().po(17).low(2).build())]
#[case::prefix(InstructionBuilder::new().po(PO_PREFIX).build())]
fn test_unrecognized(#[case] word: u32) {
    let d = decode(word);
    assert!(d.is_unrecognized(), "{word:#010x}");
    assert_eq!(d.branch_form(), BranchForm::None);
    assert_eq!(d.branch_condition(), BranchCondition::None);
    assert_eq!(d.condreg_op(), CondRegOp::None);
}

#[test]
fn test_trace_slices() {
    let d = decode(0x4CE4_1421);
    assert_eq!(d.instr_prefix(), 19);
    assert_eq!(d.instr_suffix(), 0x4CE4_1421);
    assert!(!d.prefixed());

    let p = decode(InstructionBuilder::new().po(PO_PREFIX).low(0x1234).build());
    assert!(p.prefixed());
    assert_eq!(p.instr_prefix(), 1);
}
