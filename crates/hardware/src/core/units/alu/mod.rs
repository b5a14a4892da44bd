//! Arithmetic Logic Unit (ALU).
//!
//! Evaluates every non-memory operation: arithmetic, logic, shifts,
//! comparisons, branches and jumps, plus the multiply/divide family run by
//! the multiplier and divider units.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//! - [`branch`]:     Beq, Bne, Blt, Bge, Bltu, Bgeu

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Conditional branch evaluation.
pub mod branch;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use super::{BranchOutcome, Completion, IssueRequest};
use crate::isa::{INST_BYTES, Opcode};

/// Integer operation evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes a register-register (or register-immediate) operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use oocore::core::units::alu::Alu;
    /// use oocore::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(Opcode::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(Opcode::Slt, -5_i64 as u64, 10), 1);
    /// assert_eq!(Alu::execute(Opcode::Divu, 100, 7), 14);
    /// ```
    pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
        match op {
            Opcode::Add
            | Opcode::Addi
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Mulh
            | Opcode::Mulhsu
            | Opcode::Mulhu
            | Opcode::Div
            | Opcode::Divu
            | Opcode::Rem
            | Opcode::Remu => arithmetic::execute(op, a, b),

            Opcode::Or
            | Opcode::Ori
            | Opcode::And
            | Opcode::Andi
            | Opcode::Xor
            | Opcode::Xori
            | Opcode::Slt
            | Opcode::Slti
            | Opcode::Sltu
            | Opcode::Sltiu => logic::execute(op, a, b),

            Opcode::Sll
            | Opcode::Slli
            | Opcode::Srl
            | Opcode::Srli
            | Opcode::Sra
            | Opcode::Srai => shifts::execute(op, a, b),

            _ => 0,
        }
    }

    /// Evaluates an issued operation into its completion.
    ///
    /// Immediate forms take the immediate as the second operand. Branches
    /// and jumps report their realized outcome; jumps write the link address.
    pub fn evaluate(req: &IssueRequest) -> Completion {
        let imm = req.imm as u64;
        let link = req.pc.wrapping_add(INST_BYTES);
        let mut done = Completion::for_request(req, 0);
        match req.opcode {
            Opcode::Nop => {}
            Opcode::Lui => done.value = imm,
            Opcode::Auipc => done.value = req.pc.wrapping_add(imm),
            Opcode::Jal => {
                done.value = link;
                done.branch = Some(BranchOutcome {
                    taken: true,
                    target: req.pc.wrapping_add(imm),
                });
            }
            Opcode::Jalr => {
                done.value = link;
                done.branch = Some(BranchOutcome {
                    taken: true,
                    target: req.a.wrapping_add(imm) & !1,
                });
            }
            op if op.is_branch() => {
                done.branch = Some(BranchOutcome {
                    taken: branch::taken(op, req.a, req.b),
                    target: req.pc.wrapping_add(imm),
                });
            }
            Opcode::Addi
            | Opcode::Andi
            | Opcode::Ori
            | Opcode::Xori
            | Opcode::Slti
            | Opcode::Sltiu
            | Opcode::Slli
            | Opcode::Srli
            | Opcode::Srai => done.value = Self::execute(req.opcode, req.a, imm),
            op => done.value = Self::execute(op, req.a, req.b),
        }
        done
    }
}
