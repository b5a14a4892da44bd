//! Program-Order Commit Properties.
//!
//! Random straight-line ALU programs are dispatched into a small window and
//! completed in a random order. Whatever the completion order:
//!   - entries retire in strictly increasing dispatch order,
//!   - the window passes its structural audit after every step,
//!   - the final architectural registers equal a sequential execution.

use oocore::common::ArchReg;
use oocore::core::units::alu::Alu;
use oocore::core::units::{IssueRequest, UnitClass};
use oocore::core::window::{InstructionWindow, IssuePorts, SlotId};
use oocore::isa::{DecodedInst, Opcode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const ARCH_REGS: usize = 32;

fn alu_inst() -> impl Strategy<Value = DecodedInst> {
    prop_oneof![
        (1u8..8, 0u8..8, 0u8..8).prop_map(|(rd, a, b)| DecodedInst::reg(Opcode::Add, rd, a, b)),
        (1u8..8, 0u8..8, 0u8..8).prop_map(|(rd, a, b)| DecodedInst::reg(Opcode::Xor, rd, a, b)),
        (0u8..8, 0u8..8, 0u8..8).prop_map(|(rd, a, b)| DecodedInst::reg(Opcode::Sub, rd, a, b)),
        (1u8..8, 0u8..8, -64i64..64)
            .prop_map(|(rd, a, imm)| DecodedInst::imm(Opcode::Addi, rd, a, imm)),
    ]
}

fn seed(reg: usize) -> u64 {
    reg as u64 * 1000 + 7
}

/// Sequential reference: executes `program` one instruction at a time.
fn reference(program: &[DecodedInst]) -> Vec<u64> {
    let mut regs: Vec<u64> = (0..ARCH_REGS).map(seed).collect();
    regs[0] = 0;
    for inst in program {
        let read = |r: Option<ArchReg>| r.map_or(0, |r| regs[r.index()]);
        let req = IssueRequest {
            slot: SlotId(0),
            seq: 0,
            pc: inst.pc,
            opcode: inst.opcode,
            a: read(inst.rs1),
            b: read(inst.rs2),
            imm: inst.imm,
        };
        let value = Alu::evaluate(&req).value;
        if let Some(rd) = inst.rd.filter(|rd| rd.0 != 0) {
            regs[rd.index()] = value;
        }
    }
    regs
}

struct Outcome {
    retired: Vec<u64>,
    regs: Vec<u64>,
}

/// Drives `program` through a window, completing one pending operation per
/// step, chosen by `choices`.
fn drive(
    program: &[DecodedInst],
    capacity: usize,
    phys_regs: usize,
    choices: &[usize],
) -> Result<Outcome, TestCaseError> {
    let mut w = InstructionWindow::with_sizes(capacity, ARCH_REGS, phys_regs, true);
    for r in 1..ARCH_REGS {
        w.arch_regs_mut().write(ArchReg(r as u8), seed(r));
    }

    let mut pending: Vec<IssueRequest> = Vec::new();
    let mut retired = Vec::new();
    let mut next = 0;

    for step in 0..program.len() * 8 + 16 {
        if retired.len() == program.len() {
            break;
        }
        w.begin_cycle();

        while next < program.len() {
            if w.dispatch(&program[next]).is_err() {
                break;
            }
            next += 1;
        }

        let mut ports = IssuePorts::new(4).with(UnitClass::Alu, 4);
        for slot in w.select_ready(&mut ports) {
            let req = w.issue_request(slot);
            prop_assert!(req.is_some(), "selected slot {slot} has no request");
            pending.extend(req);
        }

        if !pending.is_empty() {
            let pick = choices.get(step).copied().unwrap_or(0) % pending.len();
            let req = pending.swap_remove(pick);
            prop_assert!(w.complete_with(&Alu::evaluate(&req)));
        }

        while let Some(r) = w.commit() {
            retired.push(r.seq);
        }

        if let Err(e) = w.audit() {
            return Err(TestCaseError::fail(format!("audit after step {step}: {e}")));
        }
    }

    Ok(Outcome {
        retired,
        regs: w.arch_regs().values(),
    })
}

proptest! {
    #[test]
    fn commit_follows_program_order(
        program in prop::collection::vec(alu_inst(), 1..40),
        choices in prop::collection::vec(any::<usize>(), 0..400),
    ) {
        let out = drive(&program, 8, 48, &choices)?;
        let expected: Vec<u64> = (0..program.len() as u64).collect();
        prop_assert_eq!(out.retired, expected);
    }

    #[test]
    fn out_of_order_completion_matches_sequential_execution(
        program in prop::collection::vec(alu_inst(), 1..40),
        choices in prop::collection::vec(any::<usize>(), 0..400),
    ) {
        let out = drive(&program, 8, 48, &choices)?;
        prop_assert_eq!(out.regs, reference(&program));
    }

    #[test]
    fn tight_register_budget_still_drains(
        program in prop::collection::vec(alu_inst(), 1..30),
        choices in prop::collection::vec(any::<usize>(), 0..300),
    ) {
        // Two spare physical registers: dispatch stalls often but never deadlocks.
        let out = drive(&program, 4, ARCH_REGS + 2, &choices)?;
        prop_assert_eq!(out.retired.len(), program.len());
        prop_assert_eq!(out.regs, reference(&program));
    }
}

#[test]
fn test_reverse_completion_retires_in_order() {
    let program = [
        DecodedInst::imm(Opcode::Addi, 1, 0, 1),
        DecodedInst::imm(Opcode::Addi, 2, 0, 2),
        DecodedInst::imm(Opcode::Addi, 3, 0, 3),
    ];
    let mut w = InstructionWindow::with_sizes(4, ARCH_REGS, 40, true);
    let slots: Vec<SlotId> = program.iter().map(|i| w.dispatch(i).unwrap()).collect();
    let mut ports = IssuePorts::new(4).with(UnitClass::Alu, 4);
    assert_eq!(w.select_ready(&mut ports), slots);

    for &slot in slots.iter().rev().take(2) {
        let req = w.issue_request(slot).unwrap();
        assert!(w.complete_with(&Alu::evaluate(&req)));
        // The oldest entry has not executed, so nothing may retire yet.
        assert!(w.commit().is_none());
    }

    let req = w.issue_request(slots[0]).unwrap();
    assert!(w.complete_with(&Alu::evaluate(&req)));
    let seqs: Vec<u64> = std::iter::from_fn(|| w.commit()).map(|r| r.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2]);
    assert_eq!(w.arch_regs().read(ArchReg(3)), 3);
}
