//! Register Alias Table.
//!
//! Maps each architectural register to the physical registers holding its
//! in-flight values. Each row is a bit-vector over physical ids; the highest
//! set bit is the authoritative, most recent mapping and an empty row means
//! "read the architectural file".
//!
//! Allocation never clears older bits, and bits are cleared only when the
//! producer commits (or on flush), so several live mappings per register can
//! coexist during speculative dispatch without a separate history stack.

use crate::common::{ArchReg, PhysReg, RegMask};

/// Bit-vector alias table.
#[derive(Clone, Debug)]
pub struct RegisterAliasTable {
    rows: Vec<RegMask>,
}

impl RegisterAliasTable {
    /// Creates an empty table for `arch_regs` registers over `phys_regs` ids.
    pub fn new(arch_regs: usize, phys_regs: usize) -> Self {
        Self {
            rows: vec![RegMask::new(phys_regs); arch_regs],
        }
    }

    /// Most recent mapping of `arch`, or `None` when the value is architectural.
    pub fn lookup(&self, arch: ArchReg) -> Option<PhysReg> {
        self.rows
            .get(arch.index())
            .and_then(RegMask::highest)
            .map(|bit| PhysReg(bit as u16))
    }

    /// Records `phys` as a mapping of `arch`. Older mappings stay visible.
    pub fn allocate(&mut self, arch: ArchReg, phys: PhysReg) {
        if let Some(row) = self.rows.get_mut(arch.index()) {
            row.set(phys.index());
        }
    }

    /// Removes the `arch -> phys` mapping. Called at commit only.
    pub fn free(&mut self, arch: ArchReg, phys: PhysReg) {
        if let Some(row) = self.rows.get_mut(arch.index()) {
            row.clear(phys.index());
        }
    }

    /// Whether `arch -> phys` is currently mapped.
    pub fn is_mapped(&self, arch: ArchReg, phys: PhysReg) -> bool {
        self.rows
            .get(arch.index())
            .is_some_and(|row| row.test(phys.index()))
    }

    /// Drops every mapping; every register resolves to the architectural file.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.clear_all();
        }
    }

    /// Whether no architectural register is renamed.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(RegMask::is_empty)
    }

    /// Iterates every live `(arch, phys)` mapping.
    pub fn mappings(&self) -> impl Iterator<Item = (ArchReg, PhysReg)> + '_ {
        self.rows.iter().enumerate().flat_map(|(arch, row)| {
            row.iter()
                .map(move |bit| (ArchReg(arch as u8), PhysReg(bit as u16)))
        })
    }
}
