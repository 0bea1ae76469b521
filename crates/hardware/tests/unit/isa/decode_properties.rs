//! Decode properties.
//!
//! Verifies that `decode()` only looks at the opcode fields, that it is a
//! pure function, and that the two instruction classes never overlap.
//!
//! # Coverage Matrix
//!
//! - I-form:  any word with primary opcode 18
//! - B-form:  any word with primary opcode 16, any XL branch extended opcode
//! - CR:      the eight XL logical extended opcodes and `mcrf`
//! - Other:   the whole primary x extended opcode space (exhaustive)

use proptest::prelude::*;

use identify_core::isa::decode::{DECODE_TABLE, RELEVANT_BITS, decode};
use identify_core::isa::instruction::{
    BranchCondition, BranchForm, CondRegOp, DecodeResult, InstructionBits,
};
use identify_core::isa::opcodes::*;

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

/// Builds a word from a primary opcode, an XL extended opcode and filler
/// for every other bit.
fn word(po: u32, xo: u32, filler: u32) -> u32 {
    (po << 26) | (xo << 1) | (filler & !RELEVANT_BITS)
}

/// Classification without the trace slices.
fn class(d: &DecodeResult) -> (bool, BranchForm, BranchCondition, bool, CondRegOp) {
    (
        d.branch_identified(),
        d.branch_form(),
        d.branch_condition(),
        d.condreg_identified(),
        d.condreg_op(),
    )
}

const CR_XOS: [(u32, CondRegOp); 9] = [
    (XO_CRAND, CondRegOp::Crand),
    (XO_CRNAND, CondRegOp::Crnand),
    (XO_CROR, CondRegOp::Cror),
    (XO_CRXOR, CondRegOp::Crxor),
    (XO_CRNOR, CondRegOp::Crnor),
    (XO_CREQV, CondRegOp::Creqv),
    (XO_CRANDC, CondRegOp::Crandc),
    (XO_CRORC, CondRegOp::Crorc),
    (XO_MCRF, CondRegOp::Mcrf),
];

// ──────────────────────────────────────────────────────────
// Exhaustive
// ──────────────────────────────────────────────────────────

/// The decoder only examines the primary and extended opcode fields, so
/// covering every (PO, XO) pair covers every class of the 2^32 inputs.
#[test]
fn test_classes_are_mutually_exclusive_over_opcode_space() {
    for po in 0..64 {
        for xo in 0..1024 {
            for filler in [0, u32::MAX] {
                let d = decode(word(po, xo, filler));
                assert!(
                    !(d.branch_identified() && d.condreg_identified()),
                    "po={po} xo={xo}"
                );
                assert!(d.is_consistent(), "po={po} xo={xo}");
            }
        }
    }
}

#[test]
fn test_recognized_count_matches_table() {
    let mut recognized = 0;
    for po in 0..64 {
        for xo in 0..1024 {
            if !decode(word(po, xo, 0)).is_unrecognized() {
                recognized += 1;
            }
        }
    }
    // Whole primary opcodes 16 and 18 cover all 1024 extended opcode values.
    assert_eq!(recognized, 2 * 1024 + (DECODE_TABLE.len() - 2));
}

#[test]
fn test_every_condreg_xo_round_trips() {
    let mut seen = Vec::new();
    for (xo, op) in CR_XOS {
        let d = decode(word(PO_XL, xo, 0));
        assert_eq!(d.condreg_op(), op, "xo={xo}");
        assert!(!seen.contains(&op));
        seen.push(op);
    }
    assert_eq!(seen, CondRegOp::ALL.to_vec());
}

// ──────────────────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_decode_is_idempotent(w in any::<u32>()) {
        prop_assert_eq!(decode(w), decode(w));
    }

    #[test]
    fn prop_irrelevant_bits_are_ignored(w in any::<u32>(), noise in any::<u32>()) {
        let flipped = w ^ (noise & !RELEVANT_BITS);
        prop_assert_eq!(class(&decode(w)), class(&decode(flipped)));
    }

    #[test]
    fn prop_never_both_classes(w in any::<u32>()) {
        let d = decode(w);
        prop_assert!(!(d.branch_identified() && d.condreg_identified()));
        prop_assert!(d.is_consistent());
    }

    #[test]
    fn prop_i_form_family(rest in 0u32..(1 << 26)) {
        let d = decode((PO_B << 26) | rest);
        prop_assert!(d.branch_identified());
        prop_assert_eq!(d.branch_form(), BranchForm::IForm);
        prop_assert_eq!(d.branch_condition(), BranchCondition::None);
        prop_assert!(!d.condreg_identified());
    }

    #[test]
    fn prop_register_branches_select_condition_by_xo(
        filler in any::<u32>(),
        pick in 0usize..3,
    ) {
        let (xo, condition) = [
            (XO_BCLR, BranchCondition::Lr),
            (XO_BCCTR, BranchCondition::Ctr),
            (XO_BCTAR, BranchCondition::Tar),
        ][pick];
        let d = decode(word(PO_XL, xo, filler));
        prop_assert!(d.branch_identified());
        prop_assert_eq!(d.branch_form(), BranchForm::BForm);
        prop_assert_eq!(d.branch_condition(), condition);
    }

    #[test]
    fn prop_condreg_family(filler in any::<u32>(), pick in 0usize..9) {
        let (xo, op) = CR_XOS[pick];
        let d = decode(word(PO_XL, xo, filler));
        prop_assert!(d.condreg_identified());
        prop_assert_eq!(d.condreg_op(), op);
        prop_assert!(!d.branch_identified());
    }

    #[test]
    fn prop_suffix_is_the_word(w in any::<u32>()) {
        let d = decode(w);
        prop_assert_eq!(d.instr_suffix(), w);
        prop_assert_eq!(d.instr_prefix(), w.primary_opcode());
    }

    #[test]
    fn prop_flags_fold_back(w in any::<u32>()) {
        let d = decode(w);
        prop_assert_eq!(DecodeResult::from_flags(&d.flags(), d.instr_prefix(), d.instr_suffix()), Some(d));
    }
}
