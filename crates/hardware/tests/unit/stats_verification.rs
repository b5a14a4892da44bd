//! # Statistics Verification
//!
//! Counters gathered over a full run must agree with each other.

use oocore::config::Config;
use oocore::stats::CoreStats;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::{InstructionBuilder as I, ProgramBuilder};
use crate::common::harness::TestCore;

#[test]
fn test_counters_balance_after_run() {
    let program = ProgramBuilder::new()
        .push(I::addi(1, 0, 3))
        .push(I::addi(2, 2, 1)) // loop:
        .push(I::addi(1, 1, -1))
        .push(I::bne(1, 0, -8))
        .push(I::sd(0, 2, 0x80))
        .build();
    let mut t = TestCore::new(program);
    let _ = t.run(500);
    let s = t.core.stats().clone();

    assert_eq!(t.reg(2), 3);
    assert_eq!(s.committed, 1 + 3 * 3 + 1);
    assert_eq!(s.branches, 3);
    assert_eq!(s.mispredictions, 2);
    assert_eq!(s.flushes, 2);
    assert_eq!(s.stores_drained, 1);

    // Everything dispatched either committed or was squashed.
    assert_eq!(s.dispatched, s.committed + s.squashed);
    assert!(s.fetched >= s.dispatched);
    assert!(s.issued >= s.completed);
    assert!(s.completed >= s.committed);
    assert!(s.cycles >= s.committed / 4);
    assert!((s.branch_accuracy() - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_display_lists_every_section() {
    let text = CoreStats::default().to_string();
    for section in ["CORE STATISTICS", "PIPELINE", "BRANCH", "STALLS", "MEMORY"] {
        assert!(text.contains(section), "missing {section}");
    }
    assert!(text.contains("accuracy               100.00%"));
}

#[test]
fn test_register_floor_stall_counted_separately() {
    let mut config = Config::default();
    config.registers.phys_regs = config.registers.arch_regs + 2;
    config.latency.div = 20;

    // r2's first producer holds the top id; once r1 retires its id is free
    // but sorts below r2's live mapping, so the second r2 write must wait.
    let program = ProgramBuilder::new()
        .push(I::addi(1, 0, 1))
        .push(I::div(2, 3, 4))
        .push(I::addi(2, 0, 5))
        .build();
    let mut t = TestCore::with_config(config, program).with_regs(&[(3, 12), (4, 4)]);
    let _ = t.run(200);
    let s = t.core.stats();

    assert_eq!(t.reg(2), 5);
    assert!(s.stalls_register_floor >= 1);
    assert!(s.stalls_no_register > s.stalls_register_floor);
    assert!(t.core.window().free_list().has_free());
}
