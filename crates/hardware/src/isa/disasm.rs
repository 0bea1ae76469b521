//! Instruction disassembler for the Identify stage.
//!
//! Converts a 32-bit word into a mnemonic string for observer log lines and
//! test diagnostics. Only the decode table's instructions are rendered; any
//! other word prints as a `.long` directive.
//!
//! # Usage
//!
//! ```
//! use identify_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x4CE3_3182), "crxor 7, 3, 6");
//! assert_eq!(disassemble(0x0000_0000), ".long 0x00000000");
//! ```

use crate::isa::decode::{InstructionClass, lookup};
use crate::isa::instruction::{CondRegOp, InstructionBits};
use crate::isa::opcodes::{PO_B, PO_BC};

/// Disassembles a 32-bit Power ISA word.
///
/// # Arguments
///
/// * `word` - The raw instruction word.
pub fn disassemble(word: u32) -> String {
    let Some(rule) = lookup(word) else {
        return format!(".long {word:#010x}");
    };

    // Branch mnemonics carry the link/absolute suffixes.
    let l = if word.lk() { "l" } else { "" };
    let a = if word.aa() { "a" } else { "" };

    match word.primary_opcode() {
        PO_B => format!("b{l}{a} {:#x}", word.li_displacement()),
        PO_BC => format!(
            "bc{l}{a} {}, {}, {:#x}",
            word.bo(),
            word.bi(),
            word.bd_displacement()
        ),
        _ => match rule.class {
            InstructionClass::Branch { .. } => {
                format!("{}{l} {}, {}, {}", rule.mnemonic, word.bo(), word.bi(), word.bh())
            }
            InstructionClass::CondReg(CondRegOp::Mcrf) => {
                format!("mcrf {}, {}", word.bf(), word.bfa())
            }
            InstructionClass::CondReg(_) => {
                format!("{} {}, {}, {}", rule.mnemonic, word.bo(), word.bi(), word.bb())
            }
        },
    }
}
