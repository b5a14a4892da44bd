use oocore::common::ArchReg;
use oocore::isa::{DecodedInst, Opcode};
use oocore::sim::Program;

/// Fluent builder for a single decoded instruction.
#[derive(Clone, Debug)]
pub struct InstructionBuilder {
    inst: DecodedInst,
}

impl InstructionBuilder {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            inst: DecodedInst::new(opcode),
        }
    }

    pub fn rd(mut self, rd: u8) -> Self {
        self.inst.rd = Some(ArchReg(rd));
        self
    }

    pub fn rs1(mut self, rs1: u8) -> Self {
        self.inst.rs1 = Some(ArchReg(rs1));
        self
    }

    pub fn rs2(mut self, rs2: u8) -> Self {
        self.inst.rs2 = Some(ArchReg(rs2));
        self
    }

    pub fn imm(mut self, imm: i64) -> Self {
        self.inst.imm = imm;
        self
    }

    pub fn pc(mut self, pc: u64) -> Self {
        self.inst.pc = pc;
        self
    }

    pub fn build(self) -> DecodedInst {
        self.inst
    }

    // --- Shorthands ---

    pub fn add(rd: u8, rs1: u8, rs2: u8) -> DecodedInst {
        Self::new(Opcode::Add).rd(rd).rs1(rs1).rs2(rs2).build()
    }

    pub fn addi(rd: u8, rs1: u8, imm: i64) -> DecodedInst {
        Self::new(Opcode::Addi).rd(rd).rs1(rs1).imm(imm).build()
    }

    pub fn mul(rd: u8, rs1: u8, rs2: u8) -> DecodedInst {
        Self::new(Opcode::Mul).rd(rd).rs1(rs1).rs2(rs2).build()
    }

    pub fn div(rd: u8, rs1: u8, rs2: u8) -> DecodedInst {
        Self::new(Opcode::Div).rd(rd).rs1(rs1).rs2(rs2).build()
    }

    pub fn ld(rd: u8, base: u8, offset: i64) -> DecodedInst {
        Self::new(Opcode::Ld).rd(rd).rs1(base).imm(offset).build()
    }

    pub fn sd(base: u8, data: u8, offset: i64) -> DecodedInst {
        Self::new(Opcode::Sd).rs1(base).rs2(data).imm(offset).build()
    }

    pub fn lr(rd: u8, base: u8) -> DecodedInst {
        Self::new(Opcode::Lr).rd(rd).rs1(base).build()
    }

    pub fn sc(rd: u8, base: u8, data: u8) -> DecodedInst {
        Self::new(Opcode::Sc).rd(rd).rs1(base).rs2(data).build()
    }

    pub fn beq(rs1: u8, rs2: u8, offset: i64) -> DecodedInst {
        Self::new(Opcode::Beq).rs1(rs1).rs2(rs2).imm(offset).build()
    }

    pub fn bne(rs1: u8, rs2: u8, offset: i64) -> DecodedInst {
        Self::new(Opcode::Bne).rs1(rs1).rs2(rs2).imm(offset).build()
    }

    pub fn jalr(rd: u8, rs1: u8, offset: i64) -> DecodedInst {
        Self::new(Opcode::Jalr).rd(rd).rs1(rs1).imm(offset).build()
    }

    pub fn nop() -> DecodedInst {
        Self::new(Opcode::Nop).build()
    }
}

/// Builds a program word by word, padding gaps with `nop`.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    base: u64,
    instructions: Vec<DecodedInst>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Appends `inst` at the next address.
    pub fn push(mut self, inst: DecodedInst) -> Self {
        self.instructions.push(inst);
        self
    }

    /// Places `inst` at `pc`, padding with `nop` up to it.
    pub fn at(mut self, pc: u64, inst: DecodedInst) -> Self {
        let index = ((pc - self.base) / 4) as usize;
        if self.instructions.len() <= index {
            self.instructions.resize(index + 1, InstructionBuilder::nop());
        }
        self.instructions[index] = inst;
        self
    }

    pub fn build(self) -> Program {
        Program::new(self.base, self.instructions)
    }
}
