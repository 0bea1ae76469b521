use identify_core::isa::opcodes::*;

/// Builds raw Power ISA words field by field.
///
/// Field setters take ISA field values; placement follows the big-endian bit
/// numbering of the ISA (bit 0 is the most significant).
#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionBuilder {
    po: u32,
    bt: u32,
    ba: u32,
    bb: u32,
    xo: u32,
    low: u32,
    aa: bool,
    lk: bool,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn po(mut self, po: u32) -> Self {
        self.po = po;
        self
    }

    /// BT / BO / BF (shifted into place by `mcrf`).
    pub fn bt(mut self, bt: u32) -> Self {
        self.bt = bt;
        self
    }

    /// BA / BI.
    pub fn ba(mut self, ba: u32) -> Self {
        self.ba = ba;
        self
    }

    /// BB / BH.
    pub fn bb(mut self, bb: u32) -> Self {
        self.bb = bb;
        self
    }

    pub fn xo(mut self, xo: u32) -> Self {
        self.xo = xo;
        self
    }

    /// Raw low bits (displacement fields), OR-ed in as-is.
    pub fn low(mut self, bits: u32) -> Self {
        self.low = bits;
        self
    }

    pub fn aa(mut self, aa: bool) -> Self {
        self.aa = aa;
        self
    }

    pub fn lk(mut self, lk: bool) -> Self {
        self.lk = lk;
        self
    }

    // --- Helpers for the recognized instructions ---

    pub fn b(self, disp: i32) -> Self {
        self.po(PO_B).low((disp as u32) & 0x03FF_FFFC)
    }

    pub fn bc(self, bo: u32, bi: u32, disp: i32) -> Self {
        self.po(PO_BC).bt(bo).ba(bi).low((disp as u32) & 0xFFFC)
    }

    pub fn bclr(self, bo: u32, bi: u32, bh: u32) -> Self {
        self.po(PO_XL).bt(bo).ba(bi).bb(bh).xo(XO_BCLR)
    }

    pub fn bcctr(self, bo: u32, bi: u32, bh: u32) -> Self {
        self.po(PO_XL).bt(bo).ba(bi).bb(bh).xo(XO_BCCTR)
    }

    pub fn bctar(self, bo: u32, bi: u32, bh: u32) -> Self {
        self.po(PO_XL).bt(bo).ba(bi).bb(bh).xo(XO_BCTAR)
    }

    pub fn cr(self, xo: u32, bt: u32, ba: u32, bb: u32) -> Self {
        self.po(PO_XL).bt(bt).ba(ba).bb(bb).xo(xo)
    }

    pub fn mcrf(self, bf: u32, bfa: u32) -> Self {
        self.po(PO_XL).bt((bf & 7) << 2).ba((bfa & 7) << 2).xo(XO_MCRF)
    }

    pub fn build(&self) -> u32 {
        (self.po & 0x3F) << 26
            | (self.bt & 0x1F) << 21
            | (self.ba & 0x1F) << 16
            | (self.bb & 0x1F) << 11
            | (self.xo & 0x3FF) << 1
            | self.low
            | u32::from(self.aa) << 1
            | u32::from(self.lk)
    }
}
