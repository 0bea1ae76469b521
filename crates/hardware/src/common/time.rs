//! Simulated time.
//!
//! Time on the simulation timeline is an integer count of picoseconds. Keeping it
//! integral makes event ordering exact and lets the VCD trace use a `1 ps`
//! timescale without rounding.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Picoseconds per nanosecond.
pub const PS_PER_NS: u64 = 1_000;

/// A point (or a span) on the simulated timeline, in picoseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    /// Start of the simulation.
    pub const ZERO: Self = Self(0);

    /// Creates a time value from picoseconds.
    #[inline(always)]
    pub const fn from_ps(ps: u64) -> Self {
        Self(ps)
    }

    /// Creates a time value from nanoseconds.
    #[inline(always)]
    pub const fn from_ns(ns: u64) -> Self {
        Self(ns * PS_PER_NS)
    }

    /// Returns the raw picosecond count.
    #[inline(always)]
    pub const fn as_ps(self) -> u64 {
        self.0
    }

    /// Saturating addition, used when scheduling far-future wakeups.
    #[inline]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Add for SimTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl AddAssign for SimTime {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for SimTime {
    /// Whole nanoseconds when possible, picoseconds otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % PS_PER_NS == 0 {
            write!(f, "{} ns", self.0 / PS_PER_NS)
        } else {
            write!(f, "{} ps", self.0)
        }
    }
}
