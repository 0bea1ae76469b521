//! Signals and change tracking.
//!
//! A [`Signal`] holds a committed value plus at most one pending write. Writes
//! made during an evaluation phase become visible only when the scheduler
//! commits them at the next delta round, and the last write before a commit
//! wins. Commits report which signals actually changed value so that only the
//! sensitive processes are re-evaluated.

use std::fmt;

/// Stable identity of every traced signal.
///
/// Declaration order is the trace order. [`SignalId::name`] gives the fixed
/// human-readable name used in the waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SignalId {
    /// Clock.
    Clk,
    /// Reset.
    Rst,
    /// Enable.
    En,
    /// Instruction word.
    Instr,
    /// Arbiter-full indication.
    ArbFullMask,
    /// Primary opcode slice.
    InstrPrefix,
    /// Full instruction word.
    InstrSuffix,
    /// Branch identified.
    BranchIdentified,
    /// Branch is I-form.
    BranchIForm,
    /// Branch is B-form.
    BranchBForm,
    /// Branch target from LR.
    BranchCondLr,
    /// Branch target from CTR.
    BranchCondCtr,
    /// Branch target from TAR.
    BranchCondTar,
    /// Stall toward the fetch arbiter.
    StallFetchArb,
    /// Condition register instruction identified.
    CondRegIdentified,
    /// `crand`.
    CondRegCrand,
    /// `crnand`.
    CondRegCrnand,
    /// `cror`.
    CondRegCror,
    /// `crxor`.
    CondRegCrxor,
    /// `crnor`.
    CondRegCrnor,
    /// `creqv`.
    CondRegCreqv,
    /// `crandc`.
    CondRegCrandc,
    /// `crorc`.
    CondRegCrorc,
    /// `mcrf`.
    CondRegMcrf,
    /// Prefix opcode seen.
    DbgIsPrefixed,
}

impl SignalId {
    /// Every signal in trace order.
    pub const ALL: [Self; 25] = [
        Self::Clk,
        Self::Rst,
        Self::En,
        Self::Instr,
        Self::ArbFullMask,
        Self::InstrPrefix,
        Self::InstrSuffix,
        Self::BranchIdentified,
        Self::BranchIForm,
        Self::BranchBForm,
        Self::BranchCondLr,
        Self::BranchCondCtr,
        Self::BranchCondTar,
        Self::StallFetchArb,
        Self::CondRegIdentified,
        Self::CondRegCrand,
        Self::CondRegCrnand,
        Self::CondRegCror,
        Self::CondRegCrxor,
        Self::CondRegCrnor,
        Self::CondRegCreqv,
        Self::CondRegCrandc,
        Self::CondRegCrorc,
        Self::CondRegMcrf,
        Self::DbgIsPrefixed,
    ];

    /// Condition register operation flags, in [`CondRegOp::ALL`](crate::isa::instruction::CondRegOp::ALL) order.
    pub const CONDREG_OPS: [Self; 9] = [
        Self::CondRegCrand,
        Self::CondRegCrnand,
        Self::CondRegCror,
        Self::CondRegCrxor,
        Self::CondRegCrnor,
        Self::CondRegCreqv,
        Self::CondRegCrandc,
        Self::CondRegCrorc,
        Self::CondRegMcrf,
    ];

    /// Fixed trace name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clk => "i_clk",
            Self::Rst => "i_rst",
            Self::En => "i_en",
            Self::Instr => "i_instr",
            Self::ArbFullMask => "i_arb_full_mask",
            Self::InstrPrefix => "o_instr_prefix",
            Self::InstrSuffix => "o_instr_suffix",
            Self::BranchIdentified => "o_branch_identified",
            Self::BranchIForm => "o_branch_i_form",
            Self::BranchBForm => "o_branch_b_form",
            Self::BranchCondLr => "o_branch_cond_lr",
            Self::BranchCondCtr => "o_branch_cond_ctr",
            Self::BranchCondTar => "o_branch_cond_tar",
            Self::StallFetchArb => "o_stall_fetch_arb",
            Self::CondRegIdentified => "o_condreg_identified",
            Self::CondRegCrand => "o_condreg_crand",
            Self::CondRegCrnand => "o_condreg_crnand",
            Self::CondRegCror => "o_condreg_cror",
            Self::CondRegCrxor => "o_condreg_crxor",
            Self::CondRegCrnor => "o_condreg_crnor",
            Self::CondRegCreqv => "o_condreg_creqv",
            Self::CondRegCrandc => "o_condreg_crandc",
            Self::CondRegCrorc => "o_condreg_crorc",
            Self::CondRegMcrf => "o_condreg_mcrf",
            Self::DbgIsPrefixed => "dbg_is_prefixed",
        }
    }

    /// Width in bits.
    pub const fn width(self) -> u32 {
        match self {
            Self::Instr | Self::InstrPrefix | Self::InstrSuffix => 32,
            _ => 1,
        }
    }

    /// Position in [`SignalId::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of signals that changed during one commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet(u32);

impl ChangeSet {
    /// No changes.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of signals.
    pub const fn of(ids: &[SignalId]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < ids.len() {
            bits |= 1 << ids[i].index();
            i += 1;
        }
        Self(bits)
    }

    /// Adds a signal.
    #[inline]
    pub const fn insert(&mut self, id: SignalId) {
        self.0 |= 1 << id.index();
    }

    /// True if `id` is in the set.
    #[inline]
    pub const fn contains(self, id: SignalId) -> bool {
        self.0 & (1 << id.index()) != 0
    }

    /// True if any signal of `other` is in the set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True if nothing changed.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the members in trace order.
    pub fn iter(self) -> impl Iterator<Item = SignalId> {
        SignalId::ALL.into_iter().filter(move |id| self.contains(*id))
    }
}

/// Value of a signal as recorded in the waveform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceValue {
    /// Single-bit wire.
    Bit(bool),
    /// 32-bit vector.
    Vector(u32),
}

/// Types that can travel on a signal.
pub trait SignalValue: Copy + PartialEq + fmt::Debug {
    /// Converts the value for the waveform.
    fn trace_value(self) -> TraceValue;
}

impl SignalValue for bool {
    fn trace_value(self) -> TraceValue {
        TraceValue::Bit(self)
    }
}

impl SignalValue for u32 {
    fn trace_value(self) -> TraceValue {
        TraceValue::Vector(self)
    }
}

/// A single wire with deferred writes.
#[derive(Clone, Debug)]
pub struct Signal<T> {
    id: SignalId,
    current: T,
    pending: Option<T>,
}

impl<T: SignalValue> Signal<T> {
    /// Creates a signal holding `initial`.
    pub const fn new(id: SignalId, initial: T) -> Self {
        Self {
            id,
            current: initial,
            pending: None,
        }
    }

    /// Identity of the signal.
    pub const fn id(&self) -> SignalId {
        self.id
    }

    /// Committed value.
    #[inline]
    pub fn read(&self) -> T {
        self.current
    }

    /// Schedules `value` for the next commit, replacing any earlier pending write.
    #[inline]
    pub fn write(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Applies the pending write and records the signal in `changes` if its value moved.
    pub fn commit(&mut self, changes: &mut ChangeSet) {
        if let Some(value) = self.pending.take() {
            if value != self.current {
                self.current = value;
                changes.insert(self.id);
            }
        }
    }

    /// Committed value in waveform form.
    pub fn trace_value(&self) -> TraceValue {
        self.current.trace_value()
    }
}
