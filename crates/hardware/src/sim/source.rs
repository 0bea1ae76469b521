//! Instruction word sources for the stimulus driver.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::SourceConfig;
use crate::isa::encode;
use crate::isa::opcodes::{
    PO_XL, XO_BCCTR, XO_BCLR, XO_BCTAR, XO_CRAND, XO_CRANDC, XO_CREQV, XO_CRNAND, XO_CRNOR,
    XO_CROR, XO_CRORC, XO_CRXOR,
};

/// Supplies the words presented to the stage, one per cycle.
pub trait InstructionSource: fmt::Debug {
    /// Next word, or `None` once the source is exhausted.
    fn next_word(&mut self) -> Option<u32>;
}

/// Builds the source selected by the configuration.
pub fn from_config(config: &SourceConfig) -> Box<dyn InstructionSource> {
    match config {
        SourceConfig::Random { seed } => Box::new(RandomInstructions::new(*seed)),
        SourceConfig::Fixed { words } => Box::new(FixedSequence::new(words.clone())),
    }
}

/// A fixed list of words, presented once in order.
#[derive(Clone, Debug, Default)]
pub struct FixedSequence {
    words: Vec<u32>,
    next: usize,
}

impl FixedSequence {
    /// Creates a source over `words`.
    pub const fn new(words: Vec<u32>) -> Self {
        Self { words, next: 0 }
    }

    /// Words not yet handed out.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.next
    }
}

impl InstructionSource for FixedSequence {
    fn next_word(&mut self) -> Option<u32> {
        let word = self.words.get(self.next).copied()?;
        self.next += 1;
        Some(word)
    }
}

const BRANCH_XOS: [u32; 3] = [XO_BCLR, XO_BCCTR, XO_BCTAR];
const CR_LOGICAL_XOS: [u32; 8] = [
    XO_CRAND, XO_CRNAND, XO_CROR, XO_CRXOR, XO_CRNOR, XO_CREQV, XO_CRANDC, XO_CRORC,
];

/// Seeded, never-ending random words.
///
/// Most words are drawn from the encodings the decoder recognizes, with
/// random field values, so every output flag gets exercised. The rest are
/// stray opcode-19 words and uniformly random words.
#[derive(Clone, Debug)]
pub struct RandomInstructions {
    rng: StdRng,
}

impl RandomInstructions {
    /// Creates a generator; equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn field(&mut self, bits: u32) -> u32 {
        self.rng.gen_range(0..1 << bits)
    }

    fn flag(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn pick(&mut self, choices: &[u32]) -> u32 {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

impl InstructionSource for RandomInstructions {
    fn next_word(&mut self) -> Option<u32> {
        let word = match self.rng.gen_range(0..8u8) {
            0 => {
                let disp = (self.field(24) << 2) as i32;
                encode::i_form((disp << 6) >> 6, self.flag(), self.flag())
            }
            1 => {
                let disp = (self.field(14) << 2) as i32;
                let (bo, bi) = (self.field(5), self.field(5));
                encode::b_form(bo, bi, (disp << 16) >> 16, self.flag(), self.flag())
            }
            2 => {
                let xo = self.pick(&BRANCH_XOS);
                let (bo, bi, bh) = (self.field(5), self.field(5), self.field(2));
                encode::xl_branch(bo, bi, bh, xo, self.flag())
            }
            3 | 4 => {
                let xo = self.pick(&CR_LOGICAL_XOS);
                let (bt, ba, bb) = (self.field(5), self.field(5), self.field(5));
                encode::xl_condreg(bt, ba, bb, xo)
            }
            5 => encode::mcrf(self.field(3), self.field(3)),
            6 => (PO_XL << 26) | (self.field(10) << 1) | self.field(1),
            _ => self.rng.next_u32(),
        };
        Some(word)
    }
}
