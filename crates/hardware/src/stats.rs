//! Run statistics and functional coverage.
//!
//! This module tracks what a run exercised. It provides:
//! 1. **Activity:** Clock cycles, words issued, stage evaluations, and the deepest delta cascade.
//! 2. **Instruction mix:** Observations by class (branch forms, condition register, unrecognized).
//! 3. **Coverage:** Value bins for every output flag and the branch × condition register cross.

use std::fmt;

use crate::common::time::SimTime;
use crate::isa::instruction::{BranchCondition, BranchForm};
use crate::sim::observer::Observation;
use crate::sim::signal::SignalId;

/// Output flags with a coverage bin per value.
pub const COVER_POINTS: [SignalId; 17] = [
    SignalId::BranchIdentified,
    SignalId::BranchIForm,
    SignalId::BranchBForm,
    SignalId::BranchCondLr,
    SignalId::BranchCondCtr,
    SignalId::BranchCondTar,
    SignalId::StallFetchArb,
    SignalId::CondRegIdentified,
    SignalId::CondRegCrand,
    SignalId::CondRegCrnand,
    SignalId::CondRegCror,
    SignalId::CondRegCrxor,
    SignalId::CondRegCrnor,
    SignalId::CondRegCreqv,
    SignalId::CondRegCrandc,
    SignalId::CondRegCrorc,
    SignalId::CondRegMcrf,
];

/// A coverage bin that was never hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageHole {
    /// `flag` never took `value`.
    Value {
        /// The output flag.
        flag: SignalId,
        /// The value never seen.
        value: bool,
    },
    /// A reachable cell of the branch × condition register cross was never hit.
    Cross {
        /// Branch identified.
        branch: bool,
        /// Condition register identified.
        condreg: bool,
    },
}

impl fmt::Display for CoverageHole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { flag, value } => write!(f, "{flag}={}", u8::from(*value)),
            Self::Cross { branch, condreg } => {
                write!(f, "branch={} x condreg={}", u8::from(*branch), u8::from(*condreg))
            }
        }
    }
}

/// Hit counts per coverage bin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    bins: [[u64; 2]; COVER_POINTS.len()],
    cross: [[u64; 2]; 2],
}

impl Coverage {
    /// Adds one observation to the bins.
    pub fn sample(&mut self, obs: &Observation) {
        let flags = obs.decode.flags();
        let values = [
            flags.branch_identified,
            flags.branch_i_form,
            flags.branch_b_form,
            flags.branch_cond_lr,
            flags.branch_cond_ctr,
            flags.branch_cond_tar,
            obs.stall_fetch,
            flags.condreg_identified,
        ]
        .into_iter()
        .chain(flags.condreg_ops);

        for (bin, value) in self.bins.iter_mut().zip(values) {
            bin[usize::from(value)] += 1;
        }
        self.cross[usize::from(flags.branch_identified)][usize::from(flags.condreg_identified)] += 1;
    }

    /// Times `flag` was observed at `value`; zero for flags outside [`COVER_POINTS`].
    pub fn hits(&self, flag: SignalId, value: bool) -> u64 {
        COVER_POINTS
            .iter()
            .position(|p| *p == flag)
            .map_or(0, |i| self.bins[i][usize::from(value)])
    }

    /// Times the given branch × condition register cell was observed.
    pub const fn cross_hits(&self, branch: bool, condreg: bool) -> u64 {
        self.cross[branch as usize][condreg as usize]
    }

    /// Bins never hit. The illegal (1, 1) cross cell is not a hole.
    pub fn holes(&self) -> Vec<CoverageHole> {
        let mut holes: Vec<CoverageHole> = COVER_POINTS
            .iter()
            .zip(&self.bins)
            .flat_map(|(flag, bin)| {
                [false, true]
                    .into_iter()
                    .filter(|v| bin[usize::from(*v)] == 0)
                    .map(|value| CoverageHole::Value { flag: *flag, value })
            })
            .collect();
        for (branch, condreg) in [(false, false), (true, false), (false, true)] {
            if self.cross_hits(branch, condreg) == 0 {
                holes.push(CoverageHole::Cross { branch, condreg });
            }
        }
        holes
    }

    /// Fraction of legal bins hit, in percent.
    pub fn percent(&self) -> f64 {
        let total = COVER_POINTS.len() * 2 + 3;
        let missed = self.holes().len();
        ((total - missed) as f64 / total as f64) * 100.0
    }
}

/// Statistics of one run.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// Simulated time at the last settled instant.
    pub sim_time: SimTime,
    /// Rising clock edges.
    pub clock_cycles: u64,
    /// Words presented by the stimulus.
    pub words_issued: u64,
    /// Identify stage evaluations.
    pub stage_evaluations: u64,
    /// Most delta rounds any instant needed to settle.
    pub max_delta_rounds: usize,

    /// Observer samples.
    pub observations: u64,
    /// Observations of an I-form branch.
    pub branch_i_form: u64,
    /// Observations of a B-form branch with a displacement target.
    pub branch_b_form: u64,
    /// Observations of a register-target branch.
    pub branch_register: u64,
    /// Observations of a condition register instruction.
    pub condreg: u64,
    /// Observations of an unrecognized word.
    pub unrecognized: u64,
    /// Observations with the stall asserted.
    pub stalled: u64,

    /// Functional coverage.
    pub coverage: Coverage,
}

impl RunStats {
    /// Accounts one observation.
    pub fn record(&mut self, obs: &Observation) {
        self.observations += 1;
        let decode = &obs.decode;
        match (decode.branch_form(), decode.branch_condition()) {
            (BranchForm::IForm, _) => self.branch_i_form += 1,
            (BranchForm::BForm, BranchCondition::None) => self.branch_b_form += 1,
            (BranchForm::BForm, _) => self.branch_register += 1,
            (BranchForm::None, _) if decode.condreg_identified() => self.condreg += 1,
            (BranchForm::None, _) => self.unrecognized += 1,
        }
        if obs.stall_fetch {
            self.stalled += 1;
        }
        self.coverage.sample(obs);
    }

    /// Prints the selected sections; an empty list prints everything.
    ///
    /// Sections: `summary`, `mix`, `coverage`.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let obs = self.observations.max(1) as f64;
        let pct = |n: u64| (n as f64 / obs) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("IDENTIFY STAGE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("sim_time                 {}", self.sim_time);
            println!("sim_cycles               {}", self.clock_cycles);
            println!("words_issued             {}", self.words_issued);
            println!("stage_evaluations        {}", self.stage_evaluations);
            println!("max_delta_rounds         {}", self.max_delta_rounds);
            println!("observations             {}", self.observations);
            println!("----------------------------------------------------------");
        }
        if want("mix") {
            println!("INSTRUCTION MIX");
            println!("  branch.i_form          {} ({:.2}%)", self.branch_i_form, pct(self.branch_i_form));
            println!("  branch.b_form          {} ({:.2}%)", self.branch_b_form, pct(self.branch_b_form));
            println!("  branch.register        {} ({:.2}%)", self.branch_register, pct(self.branch_register));
            println!("  condreg                {} ({:.2}%)", self.condreg, pct(self.condreg));
            println!("  unrecognized           {} ({:.2}%)", self.unrecognized, pct(self.unrecognized));
            println!("  stalled                {} ({:.2}%)", self.stalled, pct(self.stalled));
            println!("----------------------------------------------------------");
        }
        if want("coverage") {
            println!("COVERAGE                 {:.2}%", self.coverage.percent());
            for flag in COVER_POINTS {
                println!(
                    "  {:<24} 0:{:<8} 1:{}",
                    flag.name(),
                    self.coverage.hits(flag, false),
                    self.coverage.hits(flag, true)
                );
            }
            println!(
                "  cross branch x condreg   00:{} 10:{} 01:{} 11:{}",
                self.coverage.cross_hits(false, false),
                self.coverage.cross_hits(true, false),
                self.coverage.cross_hits(false, true),
                self.coverage.cross_hits(true, true)
            );
            for hole in self.coverage.holes() {
                println!("  hole: {hole}");
            }
            println!("==========================================================");
        }
    }

    /// Prints every section.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
