//! In-memory decoded program.
//!
//! A `Program` is a list of decoded instructions laid out from a base address
//! at `INST_BYTES` spacing. It can be built in code or deserialized from JSON:
//!
//! ```json
//! {
//!   "base": 4096,
//!   "instructions": [
//!     { "opcode": "addi", "rd": 1, "rs1": 0, "imm": 5 },
//!     { "opcode": "add",  "rd": 2, "rs1": 1, "rs2": 1 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ProgramError;
use crate::core::pipeline::InstructionSource;
use crate::isa::{DecodedInst, INST_BYTES};

/// Decoded instructions at consecutive addresses.
///
/// # Examples
///
/// ```
/// use oocore::core::pipeline::InstructionSource;
/// use oocore::isa::{DecodedInst, Opcode};
/// use oocore::Program;
///
/// let program = Program::new(0x1000, vec![
///     DecodedInst::imm(Opcode::Addi, 1, 0, 5),
///     DecodedInst::reg(Opcode::Add, 2, 1, 1),
/// ]);
/// assert_eq!(program.fetch(0x1004).map(|i| i.opcode), Some(Opcode::Add));
/// assert!(program.fetch(0x1008).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Address of the first instruction.
    #[serde(default)]
    pub base: u64,
    /// Instructions in address order.
    pub instructions: Vec<DecodedInst>,
}

impl Program {
    /// Creates a program starting at `base`.
    pub fn new(base: u64, instructions: Vec<DecodedInst>) -> Self {
        Self { base, instructions }
    }

    /// Parses a program from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Parse`] for malformed JSON and
    /// [`ProgramError::Misaligned`] if the base is not instruction-aligned.
    pub fn from_json(json: &str) -> Result<Self, ProgramError> {
        let program: Self = serde_json::from_str(json)?;
        if program.base % INST_BYTES != 0 {
            return Err(ProgramError::Misaligned(program.base));
        }
        Ok(program)
    }

    /// Reads and parses a JSON program file.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Io`] if the file cannot be read, otherwise as
    /// [`Program::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Address of instruction `index`.
    #[inline]
    pub const fn pc_of(&self, index: usize) -> u64 {
        self.base + index as u64 * INST_BYTES
    }

    /// Address just past the last instruction.
    #[inline]
    pub fn end(&self) -> u64 {
        self.pc_of(self.instructions.len())
    }
}

impl InstructionSource for Program {
    fn fetch(&self, pc: u64) -> Option<DecodedInst> {
        let offset = pc.checked_sub(self.base)?;
        if offset % INST_BYTES != 0 {
            return None;
        }
        let index = usize::try_from(offset / INST_BYTES).ok()?;
        self.instructions
            .get(index)
            .cloned()
            .map(|inst| inst.at(pc))
    }

    fn entry(&self) -> u64 {
        self.base
    }
}
