//! Simulator: owns the wires, the processes and the event queue.
//!
//! Time advances from one scheduled wake-up to the next. Within one instant
//! the scheduler runs delta rounds until nothing changes:
//! 1. **Wake:** resume every process scheduled for the instant; their writes stay pending.
//! 2. **Commit:** apply pending writes and collect the set of wires that moved.
//! 3. **React:** re-evaluate the stage if one of its inputs moved, resume a
//!    stimulus waiting on a rising clock edge, note whether the observer is due.
//! 4. **Repeat** from the commit until a round changes nothing, then observe
//!    once and sample the trace.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::common::error::SimError;
use crate::common::time::SimTime;
use crate::config::Config;
use crate::core::identify::IdentifyStage;
use crate::stats::RunStats;

use super::clock::Clock;
use super::observer::{self, Observer};
use super::signal::{ChangeSet, SignalId};
use super::source::{self, InstructionSource};
use super::stimulus::{StimulusDriver, Wait};
use super::trace::VcdWriter;
use super::wires::Wires;

/// Wires the Identify stage is sensitive to.
const STAGE_SENSITIVITY: ChangeSet = ChangeSet::of(&[
    SignalId::Clk,
    SignalId::Rst,
    SignalId::En,
    SignalId::Instr,
    SignalId::ArbFullMask,
]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Process {
    Clock,
    Stimulus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Wakeup {
    time: SimTime,
    seq: u64,
    process: Process,
}

/// Result of one [`Simulator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instant was simulated and settled.
    Advanced(SimTime),
    /// The stimulus has requested the stop; nothing more will run.
    Stopped(SimTime),
}

/// The top level: clock, stimulus, Identify stage, observer and optional trace.
#[derive(Debug)]
pub struct Simulator {
    now: SimTime,
    queue: BinaryHeap<Reverse<Wakeup>>,
    seq: u64,
    started: bool,
    stopped: bool,
    max_time: Option<SimTime>,
    max_delta_rounds: usize,
    wires: Wires,
    clock: Clock,
    stimulus: StimulusDriver,
    awaiting_posedge: bool,
    stage: IdentifyStage,
    observer: Observer,
    trace: Option<VcdWriter<BufWriter<File>>>,
    stats: RunStats,
}

impl Simulator {
    /// Creates a simulator drawing words from the configured source.
    ///
    /// Tracing is not opened here; see [`Simulator::open_trace`].
    pub fn new(config: &Config) -> Self {
        Self::with_source(config, source::from_config(&config.stimulus.source))
    }

    /// Creates a simulator drawing words from `source`.
    pub fn with_source(config: &Config, source: Box<dyn InstructionSource>) -> Self {
        Self {
            now: SimTime::ZERO,
            queue: BinaryHeap::new(),
            seq: 0,
            started: false,
            stopped: false,
            max_time: config.general.max_time_ps.map(SimTime::from_ps),
            max_delta_rounds: config.general.max_delta_rounds,
            wires: Wires::new(),
            clock: Clock::new(config.clock.period_ps),
            stimulus: StimulusDriver::new(&config.stimulus, source),
            awaiting_posedge: false,
            stage: IdentifyStage::new(),
            observer: Observer::new(
                config.general.log_observations,
                config.general.keep_observations,
            ),
            trace: None,
            stats: RunStats::default(),
        }
    }

    /// Starts recording a waveform to `path`.
    ///
    /// # Errors
    ///
    /// [`SimError::TraceOpen`] if the file cannot be created.
    pub fn open_trace(&mut self, path: &Path) -> Result<(), SimError> {
        self.trace = Some(VcdWriter::create(path)?);
        info!(path = %path.display(), "tracing enabled");
        Ok(())
    }

    /// Current simulated time.
    pub const fn now(&self) -> SimTime {
        self.now
    }

    /// Committed wire values.
    pub const fn wires(&self) -> &Wires {
        &self.wires
    }

    /// The stage under test.
    pub const fn stage(&self) -> &IdentifyStage {
        &self.stage
    }

    /// Observations recorded so far.
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// True once the stimulus has requested the stop.
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Simulates the next instant with scheduled activity.
    ///
    /// # Errors
    ///
    /// * [`SimError::Starved`] if nothing is scheduled and no stop was requested.
    /// * [`SimError::TimeLimit`] if the next instant lies past the configured limit.
    /// * [`SimError::DeltaOverflow`] if the instant does not settle.
    /// * Stimulus and trace errors raised while the instant runs.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.stopped {
            return Ok(StepOutcome::Stopped(self.now));
        }
        if !self.started {
            self.started = true;
            self.schedule(SimTime::ZERO, Process::Clock);
            self.schedule(SimTime::ZERO, Process::Stimulus);
        }

        let Some(Reverse(first)) = self.queue.pop() else {
            return Err(SimError::Starved { time: self.now });
        };
        if let Some(limit) = self.max_time.filter(|limit| first.time > *limit) {
            return Err(SimError::TimeLimit { limit });
        }
        self.now = first.time;
        self.wake(first.process)?;
        while self.queue.peek().is_some_and(|Reverse(w)| w.time == first.time) {
            if let Some(Reverse(next)) = self.queue.pop() {
                self.wake(next.process)?;
            }
        }

        self.settle()?;
        self.stats.sim_time = self.now;
        if let Some(trace) = &mut self.trace {
            trace.sample(self.now, &self.wires).map_err(|source| SimError::TraceWrite {
                time: self.now,
                source,
            })?;
        }

        if self.stopped {
            self.finish()?;
            return Ok(StepOutcome::Stopped(self.now));
        }
        Ok(StepOutcome::Advanced(self.now))
    }

    /// Runs until the stimulus requests the stop.
    ///
    /// # Errors
    ///
    /// The first error returned by [`Simulator::step`].
    pub fn run(&mut self) -> Result<RunStats, SimError> {
        info!(period = %self.clock.period(), "simulation started");
        while let StepOutcome::Advanced(_) = self.step()? {}
        for hole in self.stats.coverage.holes() {
            warn!(bin = %hole, "coverage hole");
        }
        info!(time = %self.now, "simulation stopped");
        Ok(self.stats.clone())
    }

    fn schedule(&mut self, time: SimTime, process: Process) {
        self.seq += 1;
        self.queue.push(Reverse(Wakeup {
            time,
            seq: self.seq,
            process,
        }));
    }

    fn wake(&mut self, process: Process) -> Result<(), SimError> {
        match process {
            Process::Clock => {
                let next = self.clock.toggle(&mut self.wires.clk);
                self.schedule(self.now + next, Process::Clock);
                Ok(())
            }
            Process::Stimulus => self.resume_stimulus(),
        }
    }

    fn resume_stimulus(&mut self) -> Result<(), SimError> {
        match self.stimulus.resume(self.now, &mut self.wires.inputs)? {
            Wait::Delay(delay) => self.schedule(self.now + delay, Process::Stimulus),
            Wait::PosEdge => self.awaiting_posedge = true,
            Wait::Stop => {
                debug!(time = %self.now, "stop requested");
                self.stopped = true;
            }
        }
        self.stats.words_issued = self.stimulus.issued();
        Ok(())
    }

    fn settle(&mut self) -> Result<(), SimError> {
        let mut observe = false;
        for round in 0..self.max_delta_rounds {
            let changes = self.wires.commit();
            if changes.is_empty() {
                self.stats.max_delta_rounds = self.stats.max_delta_rounds.max(round);
                if observe {
                    self.observe();
                }
                return Ok(());
            }

            if changes.intersects(STAGE_SENSITIVITY) {
                let outputs = self.stage.evaluate(&self.wires.inputs.snapshot());
                self.wires.outputs.drive(&outputs);
                self.stats.stage_evaluations += 1;
            }
            if changes.contains(SignalId::Clk) && self.wires.clk.read() {
                self.stats.clock_cycles += 1;
                if std::mem::take(&mut self.awaiting_posedge) {
                    self.resume_stimulus()?;
                }
            }
            observe |= changes.intersects(observer::SENSITIVITY);
        }
        Err(SimError::DeltaOverflow {
            time: self.now,
            rounds: self.max_delta_rounds,
        })
    }

    fn observe(&mut self) {
        if let Some(record) = self.observer.observe(self.now, &self.wires) {
            self.stats.record(&record);
        }
    }

    fn finish(&mut self) -> Result<(), SimError> {
        if let Some(trace) = &mut self.trace {
            trace.flush().map_err(|source| SimError::TraceWrite {
                time: self.now,
                source,
            })?;
        }
        Ok(())
    }
}
