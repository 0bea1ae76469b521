//! Stimulus driver.
//!
//! A resumable process that walks the stage through its reset sequence and
//! then presents one word per clock cycle. Every call to
//! [`StimulusDriver::resume`] runs until the next wait and reports what the
//! driver is waiting for:
//! 1. **Reset:** assert reset with enable low and the word zero, hold for the reset time.
//! 2. **Release:** deassert reset, wait the settle time.
//! 3. **Enable:** raise enable, then wait for the next rising clock edge.
//! 4. **Present:** after the fetch delay, drive the next word and the
//!    arbiter-full pattern; repeat from the next rising edge.
//! 5. **Stop:** once the configured number of words has been presented.

use tracing::debug;

use crate::common::error::SimError;
use crate::common::time::SimTime;
use crate::config::StimulusConfig;

use super::source::InstructionSource;
use super::wires::InputWires;

/// What a suspended process waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    /// Resume after the given delay.
    Delay(SimTime),
    /// Resume at the next rising clock edge.
    PosEdge,
    /// Done; request the end of the simulation.
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Reset,
    Release,
    Enable,
    AwaitFetch,
    Present,
    Done,
}

/// Drives the stage inputs.
#[derive(Debug)]
pub struct StimulusDriver {
    reset: SimTime,
    settle: SimTime,
    fetch_delay: SimTime,
    cycles: u64,
    arbiter_full_every: u64,
    source: Box<dyn InstructionSource>,
    phase: Phase,
    issued: u64,
}

impl StimulusDriver {
    /// Creates a driver with the configured timing, drawing words from `source`.
    pub fn new(config: &StimulusConfig, source: Box<dyn InstructionSource>) -> Self {
        Self {
            reset: SimTime::from_ps(config.reset_ps),
            settle: SimTime::from_ps(config.settle_ps),
            fetch_delay: SimTime::from_ps(config.fetch_delay_ps),
            cycles: config.cycles,
            arbiter_full_every: config.arbiter_full_every,
            source,
            phase: Phase::Reset,
            issued: 0,
        }
    }

    /// Words presented so far.
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// True once the driver has requested the stop.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Runs the driver until its next wait.
    ///
    /// # Errors
    ///
    /// [`SimError::StimulusExhausted`] if the source runs dry before the
    /// configured number of words was presented.
    pub fn resume(&mut self, now: SimTime, wires: &mut InputWires) -> Result<Wait, SimError> {
        let wait = match self.phase {
            Phase::Reset => {
                wires.instr.write(0);
                wires.arb_full_mask.write(false);
                wires.rst.write(true);
                wires.en.write(false);
                debug!(%now, "reset asserted");
                self.phase = Phase::Release;
                Wait::Delay(self.reset)
            }
            Phase::Release => {
                wires.rst.write(false);
                debug!(%now, "reset released");
                self.phase = Phase::Enable;
                Wait::Delay(self.settle)
            }
            Phase::Enable => {
                wires.en.write(true);
                debug!(%now, "enabled");
                self.await_next_cycle()
            }
            Phase::AwaitFetch => {
                self.phase = Phase::Present;
                Wait::Delay(self.fetch_delay)
            }
            Phase::Present => {
                let word = self.source.next_word().ok_or(SimError::StimulusExhausted {
                    issued: self.issued,
                    expected: self.cycles,
                })?;
                self.issued += 1;
                let full = self.arbiter_full_every != 0 && self.issued % self.arbiter_full_every == 0;
                wires.instr.write(word);
                wires.arb_full_mask.write(full);
                debug!(%now, word = format_args!("{word:#010x}"), arbiter_full = full, "presented");
                self.await_next_cycle()
            }
            Phase::Done => Wait::Stop,
        };
        Ok(wait)
    }

    fn await_next_cycle(&mut self) -> Wait {
        if self.issued >= self.cycles {
            self.phase = Phase::Done;
            Wait::Stop
        } else {
            self.phase = Phase::AwaitFetch;
            Wait::PosEdge
        }
    }
}
