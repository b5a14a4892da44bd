//! Dispatch Rejection Tests.
//!
//! A dispatch that cannot get a slot or a destination register must be
//! rejected without touching any state, and must succeed once the resource
//! is released again.

use oocore::common::{ArchReg, DispatchReject, PhysReg};
use oocore::core::window::InstructionWindow;
use oocore::isa::{DecodedInst, Opcode};
use rstest::rstest;

fn addi(rd: u8, imm: i64) -> DecodedInst {
    DecodedInst::imm(Opcode::Addi, rd, 0, imm)
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(16)]
#[case(64)]
fn test_capacity_plus_one_is_rejected(#[case] capacity: usize) {
    let mut w = InstructionWindow::with_sizes(capacity, 32, 32 + capacity + 8, true);
    for i in 0..capacity {
        assert!(w.dispatch(&addi((i % 31) as u8 + 1, i as i64)).is_ok());
    }
    assert!(w.is_full());
    assert!(!w.can_dispatch());

    let free_before = w.free_list().free_count();
    assert_eq!(w.dispatch(&addi(1, 0)), Err(DispatchReject::WindowFull));
    assert_eq!(w.in_flight_count(), capacity);
    assert_eq!(w.free_list().free_count(), free_before);
    assert!(w.audit().is_ok());
}

#[test]
fn test_rejection_without_destination_still_needs_a_slot() {
    let mut w = InstructionWindow::with_sizes(2, 32, 40, true);
    let _ = w.dispatch(&addi(1, 1)).unwrap();
    let _ = w.dispatch(&addi(2, 2)).unwrap();
    let store = DecodedInst::store(1, 2, 0);
    assert_eq!(w.dispatch(&store), Err(DispatchReject::WindowFull));
}

#[test]
fn test_no_free_register_has_no_side_effects() {
    // Two allocatable registers.
    let mut w = InstructionWindow::with_sizes(8, 32, 34, true);
    let first = w.dispatch(&addi(1, 1)).unwrap();
    let _ = w.dispatch(&addi(2, 2)).unwrap();

    let head = w.head();
    let tail = w.tail();
    assert_eq!(w.dispatch(&addi(3, 3)), Err(DispatchReject::NoFreeRegister));
    assert_eq!(w.head(), head);
    assert_eq!(w.tail(), tail);
    assert_eq!(w.in_flight_count(), 2);
    assert!(w.rat().lookup(ArchReg(3)).is_none());
    assert!(w.audit().is_ok());

    // An instruction writing nothing is unaffected.
    assert!(w.dispatch(&DecodedInst::store(1, 2, 0)).is_ok());

    // Retiring the first producer frees its register for the stalled write.
    w.begin_cycle();
    let mut ports = oocore::core::window::IssuePorts::new(1)
        .with(oocore::core::units::UnitClass::Alu, 1);
    assert_eq!(w.select_ready(&mut ports), vec![first]);
    assert!(w.complete(first, 1));
    assert!(w.commit().is_some());
    assert!(w.dispatch(&addi(3, 3)).is_ok());
    assert!(w.audit().is_ok());
}

#[test]
fn test_rename_respects_highest_live_mapping() {
    // Registers 32..36 allocatable; r1 takes 32, r2 takes 33, r1 again must go above 32.
    let mut w = InstructionWindow::with_sizes(8, 32, 36, true);
    let a = w.dispatch(&addi(1, 1)).unwrap();
    let _ = w.dispatch(&addi(2, 2)).unwrap();
    let c = w.dispatch(&addi(1, 3)).unwrap();

    assert_eq!(w.entry(a).and_then(|e| e.dest), Some(PhysReg(32)));
    assert_eq!(w.entry(c).and_then(|e| e.dest), Some(PhysReg(34)));
    assert_eq!(w.rat().lookup(ArchReg(1)), Some(PhysReg(34)));

    // r1 is mapped to the top free id; the next write of r1 finds nothing above it.
    let _ = w.dispatch(&addi(1, 4)).unwrap();
    assert_eq!(w.rat().lookup(ArchReg(1)), Some(PhysReg(35)));
    assert_eq!(w.dispatch(&addi(1, 5)), Err(DispatchReject::NoFreeRegister));
}

#[test]
fn test_hardwired_zero_destination_is_not_renamed() {
    let mut w = InstructionWindow::with_sizes(4, 32, 40, true);
    let free = w.free_list().free_count();
    let slot = w.dispatch(&addi(0, 9)).unwrap();
    assert!(w.entry(slot).and_then(|e| e.dest).is_none());
    assert_eq!(w.free_list().free_count(), free);
}
