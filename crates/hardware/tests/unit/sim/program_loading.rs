//! Program Loading Tests.
//!
//! Programs are JSON documents of decoded instructions with an optional base
//! address. Loaded programs run unchanged on the core.

use std::io::Write;

use oocore::common::ProgramError;
use oocore::core::pipeline::InstructionSource;
use oocore::isa::Opcode;
use oocore::sim::Program;
use oocore::{Config, Core};

const PROGRAM: &str = r#"{
    "base": 4096,
    "instructions": [
        { "opcode": "addi", "rd": 1, "rs1": 0, "imm": 6 },
        { "opcode": "addi", "rd": 2, "rs1": 0, "imm": 7 },
        { "opcode": "mul", "rd": 3, "rs1": 1, "rs2": 2 },
        { "opcode": "sd", "rs1": 0, "rs2": 3, "imm": 256 }
    ]
}"#;

#[test]
fn test_load_and_run_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROGRAM.as_bytes()).unwrap();

    let program = Program::from_file(file.path()).unwrap();
    assert_eq!(program.len(), 4);
    assert_eq!(program.entry(), 4096);
    assert_eq!(program.end(), 4096 + 16);
    assert_eq!(program.fetch(4096 + 8).map(|i| i.opcode), Some(Opcode::Mul));

    let mut core = Core::new(Config::default(), program).unwrap();
    let summary = core.run(200);
    assert!(summary.finished);
    assert_eq!(summary.committed, 4);
    assert_eq!(core.arch_reg(3), 42);
    assert_eq!(core.memory().borrow().read(256), 42);
}

#[test]
fn test_fetch_outside_program() {
    let program = Program::from_json(PROGRAM).unwrap();
    assert!(program.fetch(0).is_none());
    assert!(program.fetch(4096 + 2).is_none());
    assert!(program.fetch(program.end()).is_none());
}

#[test]
fn test_misaligned_base_rejected() {
    let err = Program::from_json(r#"{ "base": 6, "instructions": [] }"#).unwrap_err();
    assert!(matches!(err, ProgramError::Misaligned(6)));
}

#[test]
fn test_unknown_opcode_rejected() {
    let err = Program::from_json(r#"{ "instructions": [ { "opcode": "fmadd" } ] }"#).unwrap_err();
    assert!(matches!(err, ProgramError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Program::from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ProgramError::Io(_)));
}
