//! VCD trace contents.

use std::fs;

use identify_core::sim::signal::SignalId;

use crate::common::harness::TestContext;

const BCCTR: u32 = 0x4CE4_1421;

fn traced(words: &[u32]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.vcd");
    let _ = TestContext::new().with_words(words).with_trace(&path).run_ok();
    fs::read_to_string(&path).unwrap()
}

#[test]
fn test_header_names_every_signal() {
    let vcd = traced(&[BCCTR]);
    assert!(vcd.contains("$timescale 1 ps $end"));
    for id in SignalId::ALL {
        let decl = format!(" {} $end", id.name());
        assert!(vcd.contains(&decl), "missing {}", id.name());
    }
}

#[test]
fn test_word_and_outputs_change_at_the_same_stamp() {
    let vcd = traced(&[BCCTR]);
    let stamp = vcd.split("#27000\n").nth(1).unwrap();
    // i_instr is the fourth signal; o_instr_suffix the seventh.
    assert!(stamp.contains(&format!("b{BCCTR:b} $\n")));
    assert!(stamp.contains(&format!("b{BCCTR:b} '\n")));
    // o_branch_identified and o_branch_cond_ctr go high.
    assert!(stamp.contains("1(\n"));
    assert!(stamp.contains("1,\n"));
}

#[test]
fn test_reset_pulse_is_traced() {
    let vcd = traced(&[BCCTR]);
    let body = vcd.split("$dumpvars\n").nth(1).unwrap();
    let reset_high = body.find("1\"\n").unwrap();
    let release = body.find("#12000\n").unwrap();
    let reset_low = body[release..].find("0\"\n").unwrap();
    assert!(reset_high < release);
    assert!(reset_low > 0);
}

#[test]
fn test_no_stamp_without_changes() {
    let vcd = traced(&[BCCTR]);
    let stamps: Vec<&str> = vcd.lines().filter(|l| l.starts_with('#')).collect();
    assert_eq!(
        stamps,
        vec!["#0", "#5000", "#10000", "#12000", "#15000", "#20000", "#25000", "#27000"]
    );
}
