//! Instruction encoders for the recognized formats.
//!
//! Operand values are truncated to their field widths. Used by the random
//! instruction source and by tests that need known encodings.

use crate::isa::instruction::{BD_FIELD_MASK, FIELD3_MASK, FIELD5_MASK, LI_FIELD_MASK};
use crate::isa::opcodes::{PO_B, PO_BC, PO_XL, XO_MCRF};

#[inline]
const fn flag(bit: bool, shift: u32) -> u32 {
    (bit as u32) << shift
}

/// Encodes an I-form branch (`b`, `ba`, `bl`, `bla`).
///
/// `displacement` is a byte offset; its low two bits are dropped.
pub const fn i_form(displacement: i32, aa: bool, lk: bool) -> u32 {
    (PO_B << 26) | ((displacement as u32) & LI_FIELD_MASK) | flag(aa, 1) | flag(lk, 0)
}

/// Encodes a B-form conditional branch (`bc`).
pub const fn b_form(bo: u32, bi: u32, displacement: i32, aa: bool, lk: bool) -> u32 {
    (PO_BC << 26)
        | ((bo & FIELD5_MASK) << 21)
        | ((bi & FIELD5_MASK) << 16)
        | ((displacement as u32) & BD_FIELD_MASK)
        | flag(aa, 1)
        | flag(lk, 0)
}

/// Encodes an XL-form branch to register (`bclr`, `bcctr`, `bctar`).
pub const fn xl_branch(bo: u32, bi: u32, bh: u32, xo: u32, lk: bool) -> u32 {
    (PO_XL << 26)
        | ((bo & FIELD5_MASK) << 21)
        | ((bi & FIELD5_MASK) << 16)
        | ((bh & 0x3) << 11)
        | ((xo & 0x3FF) << 1)
        | flag(lk, 0)
}

/// Encodes an XL-form condition register logical (`crand` ... `crorc`).
pub const fn xl_condreg(bt: u32, ba: u32, bb: u32, xo: u32) -> u32 {
    (PO_XL << 26)
        | ((bt & FIELD5_MASK) << 21)
        | ((ba & FIELD5_MASK) << 16)
        | ((bb & FIELD5_MASK) << 11)
        | ((xo & 0x3FF) << 1)
}

/// Encodes `mcrf BF, BFA`.
pub const fn mcrf(bf: u32, bfa: u32) -> u32 {
    (PO_XL << 26) | ((bf & FIELD3_MASK) << 23) | ((bfa & FIELD3_MASK) << 18) | (XO_MCRF << 1)
}
