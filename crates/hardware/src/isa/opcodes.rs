//! Power ISA opcodes recognized by the Identify stage.
//!
//! Primary opcodes occupy ISA bits 0-5. Branch-to-register and condition
//! register instructions share primary opcode 19 and are told apart by the
//! XL-form extended opcode in ISA bits 21-30.

/// Prefixed instruction (ISA v3.1 prefix word).
pub const PO_PREFIX: u32 = 1;

/// Branch Conditional (`bc`, B-form).
pub const PO_BC: u32 = 16;

/// Branch (`b`, I-form).
pub const PO_B: u32 = 18;

/// XL-form group: branch to LR/CTR/TAR and condition register logicals.
pub const PO_XL: u32 = 19;

/// Move Condition Register Field.
pub const XO_MCRF: u32 = 0;

/// Branch Conditional to Link Register.
pub const XO_BCLR: u32 = 16;

/// Condition Register NOR.
pub const XO_CRNOR: u32 = 33;

/// Condition Register AND with Complement.
pub const XO_CRANDC: u32 = 129;

/// Condition Register XOR.
pub const XO_CRXOR: u32 = 193;

/// Condition Register NAND.
pub const XO_CRNAND: u32 = 225;

/// Condition Register AND.
pub const XO_CRAND: u32 = 257;

/// Condition Register Equivalent.
pub const XO_CREQV: u32 = 289;

/// Condition Register OR with Complement.
pub const XO_CRORC: u32 = 417;

/// Condition Register OR.
pub const XO_CROR: u32 = 449;

/// Branch Conditional to Count Register.
pub const XO_BCCTR: u32 = 528;

/// Branch Conditional to Branch Target Address Register.
pub const XO_BCTAR: u32 = 560;
