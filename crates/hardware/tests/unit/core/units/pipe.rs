//! Fixed-Latency Unit Timing.
//!
//! The core calls `poll_result` at the start of a cycle, then `tick`, then
//! `issue`. An operation issued in cycle N must be polled in cycle N + latency.

use oocore::config::Config;
use oocore::core::units::pipe::FixedLatencyUnit;
use oocore::core::units::{ExecutionUnit, IssueOutcome, IssueRequest, UnitClass};
use oocore::core::window::SlotId;
use oocore::isa::Opcode;
use rstest::rstest;

fn req(opcode: Opcode, seq: u64) -> IssueRequest {
    IssueRequest {
        slot: SlotId(seq as usize),
        seq,
        pc: 0,
        opcode,
        a: 6,
        b: 7,
        imm: 0,
    }
}

/// Cycle in which the completion for an operation issued in cycle 0 is polled.
fn completion_cycle(unit: &mut FixedLatencyUnit, op: Opcode) -> u64 {
    assert_eq!(unit.issue(req(op, 0)), IssueOutcome::Accepted);
    for cycle in 1..64 {
        if let Some(done) = unit.poll_result() {
            assert_eq!(done.seq, 0);
            return cycle;
        }
        unit.tick();
    }
    panic!("no completion");
}

#[rstest]
#[case(FixedLatencyUnit::alu(1), Opcode::Add, 1)]
#[case(FixedLatencyUnit::alu(2), Opcode::Add, 2)]
#[case(FixedLatencyUnit::mul(3), Opcode::Mul, 3)]
#[case(FixedLatencyUnit::div(12, false), Opcode::Div, 12)]
fn test_result_after_latency(#[case] mut unit: FixedLatencyUnit, #[case] op: Opcode, #[case] latency: u64) {
    assert_eq!(unit.latency(), latency);
    assert_eq!(completion_cycle(&mut unit, op), latency);
    assert!(unit.is_idle());
}

#[test]
fn test_pipelined_unit_accepts_every_cycle() {
    let mut unit = FixedLatencyUnit::mul(3);
    for seq in 0..3 {
        assert_eq!(unit.issue(req(Opcode::Mul, seq)), IssueOutcome::Accepted);
        // One operation per cycle.
        assert_eq!(unit.issue(req(Opcode::Mul, 99)), IssueOutcome::Busy);
        unit.tick();
    }
    assert_eq!(unit.occupancy(), 3);

    let mut seqs = Vec::new();
    for _ in 0..4 {
        while let Some(done) = unit.poll_result() {
            assert_eq!(done.value, 42);
            seqs.push(done.seq);
        }
        unit.tick();
    }
    assert_eq!(seqs, vec![0, 1, 2]);
}

#[test]
fn test_unpipelined_divider_blocks_until_polled() {
    let mut unit = FixedLatencyUnit::div(4, false);
    assert_eq!(unit.issue(req(Opcode::Div, 0)), IssueOutcome::Accepted);
    for _ in 0..3 {
        unit.tick();
        assert!(!unit.can_accept());
        assert_eq!(unit.issue(req(Opcode::Div, 1)), IssueOutcome::Busy);
    }
    unit.tick();
    assert!(unit.poll_result().is_some());
    assert!(unit.can_accept());
}

#[test]
fn test_flush_discards_in_flight() {
    let mut unit = FixedLatencyUnit::div(4, true);
    let _ = unit.issue(req(Opcode::Div, 0));
    unit.tick();
    let _ = unit.issue(req(Opcode::Div, 1));
    unit.flush();
    assert!(unit.is_idle());
    for _ in 0..8 {
        unit.tick();
        assert!(unit.poll_result().is_none());
    }
}

#[test]
fn test_from_config_builds_configured_instances() {
    let mut config = Config::default();
    config.units.alu = 3;
    config.units.mul = 2;
    config.units.div = 1;
    config.latency.div = 20;
    let units = FixedLatencyUnit::from_config(&config);

    let count = |class: UnitClass| units.iter().filter(|u| u.class() == class).count();
    assert_eq!(count(UnitClass::Alu), 3);
    assert_eq!(count(UnitClass::Mul), 2);
    assert_eq!(count(UnitClass::Div), 1);
    assert_eq!(count(UnitClass::Lsu), 0);
    assert!(units.iter().any(|u| u.class() == UnitClass::Div && u.latency() == 20));
}
