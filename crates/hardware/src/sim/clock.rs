//! Free-running clock generator.

use crate::common::time::SimTime;

use super::signal::Signal;

/// Square-wave clock with a 50% duty cycle.
///
/// The first toggle drives the clock high, so the first rising edge falls at
/// the instant the generator is first woken. An odd period puts the extra
/// picosecond in the low phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clock {
    high: SimTime,
    low: SimTime,
}

impl Clock {
    /// Creates a clock with the given period in picoseconds.
    pub const fn new(period_ps: u64) -> Self {
        let high = period_ps / 2;
        Self {
            high: SimTime::from_ps(high),
            low: SimTime::from_ps(period_ps - high),
        }
    }

    /// Full period.
    pub const fn period(&self) -> SimTime {
        SimTime::from_ps(self.high.as_ps() + self.low.as_ps())
    }

    /// Inverts the clock wire and returns the time until the next toggle.
    pub fn toggle(&self, clk: &mut Signal<bool>) -> SimTime {
        let rising = !clk.read();
        clk.write(rising);
        if rising { self.high } else { self.low }
    }
}
