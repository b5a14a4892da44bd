use oocore::core::pipeline::InstructionSource;
use oocore::isa::Opcode;

use super::builder::instruction::{InstructionBuilder, ProgramBuilder};

#[test]
fn test_program_builder_pads_with_nop() {
    let program = ProgramBuilder::new()
        .base(0x100)
        .push(InstructionBuilder::addi(1, 0, 1))
        .at(0x110, InstructionBuilder::addi(2, 0, 2))
        .build();

    assert_eq!(program.len(), 5);
    assert_eq!(program.fetch(0x104).map(|i| i.opcode), Some(Opcode::Nop));
    let last = program.fetch(0x110).unwrap();
    assert_eq!(last.opcode, Opcode::Addi);
    assert_eq!(last.pc, 0x110);
    assert!(program.fetch(0x114).is_none());
}

#[test]
fn test_instruction_builder_fields() {
    let inst = InstructionBuilder::new(Opcode::Sub).rd(3).rs1(1).rs2(2).pc(0x40).build();
    assert_eq!(inst.rd.map(|r| r.0), Some(3));
    assert_eq!(inst.rs1.map(|r| r.0), Some(1));
    assert_eq!(inst.rs2.map(|r| r.0), Some(2));
    assert_eq!(inst.pc, 0x40);
    assert!(InstructionBuilder::sd(1, 2, 8).rd.is_none());
}
