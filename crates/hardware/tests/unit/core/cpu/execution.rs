//! Run Loop and Statistics Tests.

use oocore::config::Config;
use oocore::sim::Program;
use oocore::Core;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::{InstructionBuilder as I, ProgramBuilder};
use crate::common::harness::TestCore;

/// `r1 = sum(1..=n)` with a backward conditional branch.
fn countdown_sum(n: i64) -> Program {
    ProgramBuilder::new()
        .push(I::addi(2, 0, n)) // counter
        .push(I::addi(1, 0, 0)) // sum
        .push(I::add(1, 1, 2)) // loop:
        .push(I::addi(2, 2, -1))
        .push(I::bne(2, 0, -8))
        .push(I::addi(3, 1, 0))
        .build()
}

#[test]
fn test_empty_program_is_idle() {
    let mut t = TestCore::new(Program::new(0, Vec::new()));
    let summary = t.core.run(10);
    assert!(summary.finished);
    assert_eq!(summary.committed, 0);
    assert!(summary.cycles <= 1);
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(20)]
fn test_loop_with_mispredicted_back_edges(#[case] n: i64) {
    let mut t = TestCore::new(countdown_sum(n));
    let _ = t.run(2_000);

    let expected = (n * (n + 1) / 2) as u64;
    assert_eq!(t.reg(1), expected);
    assert_eq!(t.reg(3), expected);
    assert_eq!(t.reg(2), 0);

    // Not-taken prediction misses every back edge.
    let stats = t.core.stats();
    assert_eq!(stats.branches, n as u64);
    assert_eq!(stats.mispredictions, n as u64 - 1);
    assert_eq!(stats.flushes, stats.mispredictions);
    assert_eq!(stats.committed, 2 + 3 * n as u64 + 1);
}

#[test]
fn test_run_respects_cycle_limit() {
    let mut core = Core::new(Config::default(), countdown_sum(50)).unwrap();
    let partial = core.run(10);
    assert!(!partial.finished);
    assert_eq!(partial.cycles, 10);

    let rest = core.run(10_000);
    assert!(rest.finished);
    assert_eq!(partial.committed + rest.committed, core.stats().committed);
    assert_eq!(core.arch_reg(1), 1275);
}

#[test]
fn test_ipc_bounded_by_commit_width() {
    let mut builder = ProgramBuilder::new();
    for i in 0..64 {
        builder = builder.push(I::addi((i % 31) as u8 + 1, 0, i64::from(i)));
    }
    let mut t = TestCore::new(builder.build());
    let _ = t.run(500);

    let stats = t.core.stats();
    assert_eq!(stats.committed, 64);
    assert!(stats.ipc() > 1.0, "independent work should overlap: {stats}");
    assert!(stats.ipc() <= t.core.config().window.commit_width as f64);
}

#[test]
fn test_narrow_core_still_correct() {
    let config = Config::from_json(
        r#"{
            "window": { "capacity": 2, "dispatch_width": 1, "issue_width": 1, "commit_width": 1 },
            "registers": { "phys_regs": 34 },
            "units": { "alu": 1, "mul": 1, "div": 1, "lsu": 1 },
            "latency": { "mul": 5 }
        }"#,
    )
    .unwrap();
    let program = ProgramBuilder::new()
        .push(I::addi(1, 0, 6))
        .push(I::addi(2, 0, 7))
        .push(I::mul(3, 1, 2))
        .push(I::addi(3, 3, 1))
        .build();
    let mut t = TestCore::with_config(config, program);
    let _ = t.run(200);
    assert_eq!(t.reg(3), 43);
    assert!(t.core.stats().stalls_window_full + t.core.stats().stalls_no_register > 0);
}
