//! Run statistics and coverage bins.

use pretty_assertions::assert_eq;

use identify_core::common::SimTime;
use identify_core::core::StageControl;
use identify_core::isa::decode::decode;
use identify_core::sim::observer::Observation;
use identify_core::sim::signal::SignalId;
use identify_core::stats::{COVER_POINTS, Coverage, CoverageHole, RunStats};

use crate::common::harness::TestContext;

fn observation(word: u32, stall_fetch: bool) -> Observation {
    Observation {
        time: SimTime::ZERO,
        word,
        control: StageControl {
            reset: false,
            enable: true,
            arbiter_full: stall_fetch,
        },
        decode: decode(word),
        stall_fetch,
    }
}

#[test]
fn test_record_classifies_observations() {
    let mut stats = RunStats::default();
    for (word, stall) in [
        (0x4803_2BFB, false),
        (0x425B_2BFA, false),
        (0x4CE4_1421, true),
        (0x4CE3_3182, false),
        (0x0000_0000, true),
    ] {
        stats.record(&observation(word, stall));
    }
    assert_eq!(stats.observations, 5);
    assert_eq!(stats.branch_i_form, 1);
    assert_eq!(stats.branch_b_form, 1);
    assert_eq!(stats.branch_register, 1);
    assert_eq!(stats.condreg, 1);
    assert_eq!(stats.unrecognized, 1);
    assert_eq!(stats.stalled, 2);
}

#[test]
fn test_coverage_bins() {
    let mut coverage = Coverage::default();
    coverage.sample(&observation(0x4CE3_3182, false));

    assert_eq!(coverage.hits(SignalId::CondRegCrxor, true), 1);
    assert_eq!(coverage.hits(SignalId::CondRegCrand, false), 1);
    assert_eq!(coverage.hits(SignalId::BranchIdentified, true), 0);
    assert_eq!(coverage.hits(SignalId::Clk, true), 0);
    assert_eq!(coverage.cross_hits(false, true), 1);

    let holes = coverage.holes();
    assert!(holes.contains(&CoverageHole::Value {
        flag: SignalId::BranchIdentified,
        value: true
    }));
    assert!(holes.contains(&CoverageHole::Cross {
        branch: true,
        condreg: false
    }));
    assert!(!holes.contains(&CoverageHole::Value {
        flag: SignalId::CondRegCrxor,
        value: true
    }));
}

#[test]
fn test_every_word_class_closes_coverage() {
    let words = [
        0x4803_2BFB,
        0x425B_2BFA,
        0x4CE4_1021,
        0x4CE4_1421,
        0x4CE4_1461,
        0x4C00_0202,
        0x4C00_01C2,
        0x4C00_0382,
        0x4C00_0182,
        0x4C00_0042,
        0x4C00_0242,
        0x4C00_0102,
        0x4C00_0342,
        0x4F84_0000,
        0x0000_0000,
    ];
    let (_, stats) = TestContext::new()
        .with_words(&words)
        .with_arbiter_full_every(2)
        .run_ok();

    let holes = stats.coverage.holes();
    assert!(holes.is_empty(), "{holes:?}");
    assert!((stats.coverage.percent() - 100.0).abs() < f64::EPSILON);
    assert_eq!(COVER_POINTS.len(), 17);
}

#[test]
fn test_hole_display() {
    let hole = CoverageHole::Value {
        flag: SignalId::BranchCondTar,
        value: true,
    };
    assert_eq!(hole.to_string(), "o_branch_cond_tar=1");
    let cross = CoverageHole::Cross {
        branch: false,
        condreg: false,
    };
    assert_eq!(cross.to_string(), "branch=0 x condreg=0");
}
