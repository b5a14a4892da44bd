//! Unified Instruction Window.
//!
//! A single circular buffer of in-flight instructions acting as issue queue,
//! reservation station and reorder buffer at once. It owns the rename state
//! (alias table, free list, physical register file) and the committed
//! architectural register file, and provides:
//! 1. **Dispatch:** Renames sources and destination and allocates a slot, or rejects with no side effects.
//! 2. **Wakeup:** Marks a physical register ready and captures its value in every waiting consumer.
//! 3. **Select:** Age-ordered choice of ready entries under per-class port limits (see [`select`]).
//! 4. **Complete:** Records results reported by execution units, in any order.
//! 5. **Commit:** Retires the oldest executed entry into architectural state and releases its register.
//! 6. **Flush:** Discards everything in flight and returns every allocated register exactly once.
//!
//! All stage functions take the window by exclusive reference; nothing here is
//! global. Entries, registers and alias-table rows refer to each other only
//! through integer ids.

/// Window entry, slot id and retirement records.
pub mod entry;

/// Issue-port budget and age-ordered select.
pub mod select;

pub use entry::{BranchResolution, RetiredEntry, SlotId, SourceOperand, WindowEntry};
pub use select::IssuePorts;

use tracing::{debug, trace, warn};

use crate::common::{ArchReg, AuditError, DispatchReject, PhysReg};
use crate::config::Config;
use crate::core::arch::ArchRegFile;
use crate::core::rename::{FreeList, PhysRegFile, RegisterAliasTable};
use crate::core::units::{Completion, IssueRequest};
use crate::isa::DecodedInst;

/// Unified instruction window with its rename state.
#[derive(Clone, Debug)]
pub struct InstructionWindow {
    entries: Vec<WindowEntry>,
    /// Oldest entry (commit point).
    head: usize,
    /// Next slot to allocate.
    tail: usize,
    count: usize,
    next_seq: u64,
    rat: RegisterAliasTable,
    free_list: FreeList,
    prf: PhysRegFile,
    arch: ArchRegFile,
}

impl InstructionWindow {
    /// Creates an empty window sized by `config`.
    ///
    /// The configuration is expected to have been validated.
    pub fn new(config: &Config) -> Self {
        let regs = &config.registers;
        Self::with_sizes(
            config.window.capacity,
            regs.arch_regs,
            regs.phys_regs,
            regs.hardwired_zero,
        )
    }

    /// Creates an empty window with explicit sizes.
    pub fn with_sizes(
        capacity: usize,
        arch_regs: usize,
        phys_regs: usize,
        hardwired_zero: bool,
    ) -> Self {
        Self {
            entries: vec![WindowEntry::default(); capacity.max(1)],
            head: 0,
            tail: 0,
            count: 0,
            next_seq: 0,
            rat: RegisterAliasTable::new(arch_regs, phys_regs),
            free_list: FreeList::new(phys_regs, arch_regs),
            prf: PhysRegFile::new(phys_regs),
            arch: ArchRegFile::new(arch_regs, hardwired_zero),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of in-flight instructions.
    #[inline]
    pub const fn in_flight_count(&self) -> usize {
        self.count
    }

    /// Nothing in flight.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Every slot occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// A slot is free. Register availability is checked by `dispatch` itself.
    #[inline]
    pub fn can_dispatch(&self) -> bool {
        !self.is_full()
    }

    /// Index of the oldest entry.
    #[inline]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Index the next dispatch will occupy.
    #[inline]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// The entry in `slot`.
    pub fn entry(&self, slot: SlotId) -> Option<&WindowEntry> {
        self.entries.get(slot.0)
    }

    /// Valid entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &WindowEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).map(move |i| {
            let idx = (self.head + i) % cap;
            (SlotId(idx), &self.entries[idx])
        })
    }

    /// Alias table.
    #[inline]
    pub const fn rat(&self) -> &RegisterAliasTable {
        &self.rat
    }

    /// Free list.
    #[inline]
    pub const fn free_list(&self) -> &FreeList {
        &self.free_list
    }

    /// Physical register file.
    #[inline]
    pub const fn prf(&self) -> &PhysRegFile {
        &self.prf
    }

    /// Committed architectural register file.
    #[inline]
    pub const fn arch_regs(&self) -> &ArchRegFile {
        &self.arch
    }

    /// Mutable architectural register file, for seeding initial state.
    #[inline]
    pub const fn arch_regs_mut(&mut self) -> &mut ArchRegFile {
        &mut self.arch
    }

    /// Destination the window will rename, `None` for no write or the hardwired zero.
    fn renamed_dest(&self, inst: &DecodedInst) -> Option<ArchReg> {
        inst.rd
            .filter(|rd| rd.index() < self.arch.len() && !self.arch.is_zero(*rd))
    }

    /// Resolves one source through the alias table.
    fn resolve_source(&self, reg: Option<ArchReg>) -> SourceOperand {
        let Some(arch) = reg else {
            return SourceOperand::resolved(None, None, 0);
        };
        if self.arch.is_zero(arch) {
            return SourceOperand::resolved(Some(arch), None, 0);
        }
        match self.rat.lookup(arch) {
            None => SourceOperand::resolved(Some(arch), None, self.arch.read(arch)),
            Some(phys) => {
                let slot = self.prf.get(phys);
                if slot.ready {
                    SourceOperand::resolved(Some(arch), Some(phys), slot.value)
                } else {
                    SourceOperand::waiting(arch, phys)
                }
            }
        }
    }

    /// Renames `inst` and places it at the tail.
    ///
    /// Sources are resolved before the destination is renamed, so an
    /// instruction reading and writing the same register sees the previous
    /// producer. Either precondition failing rejects with no side effects.
    ///
    /// # Errors
    ///
    /// [`DispatchReject::WindowFull`] when no slot is free and
    /// [`DispatchReject::NoFreeRegister`] when a destination cannot be allocated.
    pub fn dispatch(&mut self, inst: &DecodedInst) -> Result<SlotId, DispatchReject> {
        if self.is_full() {
            return Err(DispatchReject::WindowFull);
        }

        let rd = self.renamed_dest(inst);
        // A new mapping must sort above every live mapping of the same register.
        let floor = rd.and_then(|r| self.rat.lookup(r));
        if rd.is_some() && self.free_list.peek_above(floor).is_none() {
            return Err(DispatchReject::NoFreeRegister);
        }

        let src = [self.resolve_source(inst.rs1), self.resolve_source(inst.rs2)];

        let dest = match rd {
            Some(r) => {
                let phys = self
                    .free_list
                    .allocate_above(floor)
                    .ok_or(DispatchReject::NoFreeRegister)?;
                self.prf.mark_pending(phys);
                self.rat.allocate(r, phys);
                Some(phys)
            }
            None => None,
        };

        let slot = SlotId(self.tail);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries[self.tail] = WindowEntry {
            valid: true,
            seq,
            pc: inst.pc,
            opcode: inst.opcode,
            imm: inst.imm,
            rd,
            src,
            dest,
            prediction: if inst.opcode.is_control() {
                Some(inst.prediction.unwrap_or_default())
            } else {
                None
            },
            ..WindowEntry::default()
        };
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;

        trace!(
            pc = format_args!("{:#x}", inst.pc),
            %slot,
            seq,
            opcode = ?inst.opcode,
            dest = ?dest,
            "dispatch"
        );
        Ok(slot)
    }

    /// Stores `value` in `phys`, marks it ready and wakes every waiting consumer.
    ///
    /// Returns the number of source operands woken. Woken entries become
    /// eligible for select on the next cycle.
    pub fn wakeup(&mut self, phys: PhysReg, value: u64) -> usize {
        self.prf.write(phys, value);
        let mut woken = 0;
        let cap = self.entries.len();
        for i in 0..self.count {
            let e = &mut self.entries[(self.head + i) % cap];
            if e.issued {
                continue;
            }
            for s in &mut e.src {
                if !s.ready && s.phys == Some(phys) {
                    s.ready = true;
                    s.value = value;
                    e.just_woken = true;
                    woken += 1;
                }
            }
        }
        if woken > 0 {
            trace!(%phys, value, woken, "wakeup");
        }
        woken
    }

    /// Starts a new cycle: wakeups from the previous cycle become visible to select.
    pub fn begin_cycle(&mut self) {
        for e in &mut self.entries {
            e.just_woken = false;
        }
    }

    /// Operand bundle for a selected entry.
    pub fn issue_request(&self, slot: SlotId) -> Option<IssueRequest> {
        let e = self.entries.get(slot.0).filter(|e| e.valid && e.issued)?;
        Some(IssueRequest {
            slot,
            seq: e.seq,
            pc: e.pc,
            opcode: e.opcode,
            a: e.src[0].value,
            b: e.src[1].value,
            imm: e.imm,
        })
    }

    /// Returns a selected entry to the candidate pool after its unit refused it.
    pub fn cancel_issue(&mut self, slot: SlotId) {
        if let Some(e) = self.entries.get_mut(slot.0)
            && e.valid
            && !e.executed
        {
            e.issued = false;
        }
    }

    /// Records a bare `(slot, value)` result.
    ///
    /// Returns whether the completion was accepted.
    pub fn complete(&mut self, slot: SlotId, value: u64) -> bool {
        let Some(seq) = self.entries.get(slot.0).map(|e| e.seq) else {
            warn!(%slot, "completion for a slot outside the window");
            return false;
        };
        self.complete_with(&Completion::new(slot, seq, value))
    }

    /// Records a completion reported by an execution unit.
    ///
    /// Completions may arrive in any order. A completion for an invalid,
    /// unissued or already executed slot, or one whose sequence number no
    /// longer matches (the slot was flushed and reused), is dropped.
    pub fn complete_with(&mut self, done: &Completion) -> bool {
        let Some(e) = self.entries.get_mut(done.slot.0) else {
            warn!(slot = %done.slot, "completion for a slot outside the window");
            return false;
        };
        if !e.valid || !e.issued || e.executed || e.seq != done.seq {
            warn!(
                slot = %done.slot,
                seq = done.seq,
                valid = e.valid,
                issued = e.issued,
                executed = e.executed,
                "stale completion dropped"
            );
            return false;
        }

        e.result = done.value;
        e.result_valid = true;
        e.executed = true;
        e.outcome = done.branch;
        e.mem_addr = done.mem_addr;
        e.store_data = done.store_data;
        let dest = e.dest;

        trace!(slot = %done.slot, seq = done.seq, value = done.value, "complete");
        if let Some(phys) = dest {
            let _ = self.wakeup(phys, done.value);
        }
        true
    }

    /// Retires the oldest entry if it has executed.
    ///
    /// Writes the destination to the architectural file and releases its
    /// physical register. A branch or jump whose outcome disagrees with its
    /// prediction still retires, after which the whole window is flushed; the
    /// returned record's `branch.next_pc` is where fetch must resume.
    pub fn commit(&mut self) -> Option<RetiredEntry> {
        if self.count == 0 {
            return None;
        }
        let slot = SlotId(self.head);
        let e = &self.entries[self.head];
        if !e.valid || !e.executed {
            return None;
        }

        let retired = RetiredEntry {
            slot,
            seq: e.seq,
            pc: e.pc,
            opcode: e.opcode,
            rd: e.rd,
            dest: e.dest,
            value: e.result,
            mem_addr: e.mem_addr,
            branch: e.resolve_branch(),
        };

        if let (Some(rd), Some(phys)) = (retired.rd, retired.dest) {
            self.arch.write(rd, retired.value);
            self.rat.free(rd, phys);
            self.release(phys);
        }

        self.entries[self.head] = WindowEntry::default();
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;

        trace!(
            pc = format_args!("{:#x}", retired.pc),
            %slot,
            seq = retired.seq,
            value = retired.value,
            "commit"
        );

        if retired.mispredicted() {
            debug!(
                pc = format_args!("{:#x}", retired.pc),
                redirect = format_args!("{:#x}", retired.branch.map_or(0, |b| b.next_pc)),
                "branch mispredicted at commit"
            );
            let _ = self.flush();
        }
        Some(retired)
    }

    /// Discards every in-flight entry.
    ///
    /// Every destination register of a valid entry returns to the free list
    /// exactly once, the alias table is cleared so every register reads the
    /// architectural file, and head, tail and count are reset. Flushing an
    /// empty window is a no-op. Returns the number of entries discarded.
    pub fn flush(&mut self) -> usize {
        let flushed = self.count;
        let cap = self.entries.len();
        for i in 0..self.count {
            let e = &self.entries[(self.head + i) % cap];
            if let Some(phys) = e.dest.filter(|_| e.valid) {
                self.prf.release(phys);
                Self::return_to_free_list(&mut self.free_list, phys);
            }
        }
        for e in &mut self.entries {
            *e = WindowEntry::default();
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.rat.reset();

        if flushed > 0 {
            debug!(flushed, free = self.free_list.free_count(), "window flushed");
        }
        flushed
    }

    /// Releases a retiring destination register.
    fn release(&mut self, phys: PhysReg) {
        self.prf.release(phys);
        Self::return_to_free_list(&mut self.free_list, phys);
    }

    /// Frees `phys`; a register that is already free or reserved breaks register conservation.
    fn return_to_free_list(free_list: &mut FreeList, phys: PhysReg) {
        let freed = free_list.free(phys);
        if !freed {
            warn!(%phys, "register already free or reserved");
        }
        debug_assert!(freed, "{phys} freed twice or reserved");
    }

    /// Checks the structural invariants of the window and its rename state.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn audit(&self) -> Result<(), AuditError> {
        let cap = self.entries.len();

        // Occupancy: head..tail enumerates exactly the valid slots.
        let valid = self.entries.iter().filter(|e| e.valid).count();
        let live_range_ok = (0..cap).all(|i| {
            let offset = (i + cap - self.head) % cap;
            self.entries[i].valid == (offset < self.count)
        });
        if valid != self.count
            || self.count > cap
            || self.tail != (self.head + self.count) % cap
            || !live_range_ok
        {
            return Err(AuditError::Occupancy {
                head: self.head,
                tail: self.tail,
                count: self.count,
                valid,
            });
        }

        for (slot, e) in self.entries.iter().enumerate() {
            if e.issued && !e.valid {
                return Err(AuditError::Lifecycle {
                    slot,
                    reason: "issued without valid",
                });
            }
            if e.executed && !e.issued {
                return Err(AuditError::Lifecycle {
                    slot,
                    reason: "executed without issued",
                });
            }
            if e.issued && !e.operands_ready() {
                return Err(AuditError::Lifecycle {
                    slot,
                    reason: "issued with a source not ready",
                });
            }
        }

        // Register partition: reserved, free, or owned by one live entry.
        let total = self.free_list.total();
        let mut owners = vec![0_u8; total];
        for phys in self.free_list.iter() {
            if self.free_list.is_reserved(phys) {
                return Err(AuditError::ReservedFree(phys));
            }
            owners[phys.index()] += 1;
        }
        for (_, e) in self.iter() {
            if let Some(phys) = e.dest {
                let owner = owners
                    .get_mut(phys.index())
                    .ok_or(AuditError::DoubleOwned(phys))?;
                *owner += 1;
            }
        }
        for (id, owner) in owners.iter().enumerate() {
            let phys = PhysReg(id as u16);
            match (*owner, self.free_list.is_reserved(phys)) {
                (0, true) | (1, false) => {}
                (0, false) => return Err(AuditError::Leaked(phys)),
                _ => return Err(AuditError::DoubleOwned(phys)),
            }
        }

        if let Some((arch, phys)) = self
            .iter()
            .filter_map(|(_, e)| e.rd.zip(e.dest))
            .find(|&(arch, phys)| !self.rat.is_mapped(arch, phys))
        {
            return Err(AuditError::UnmappedProducer { arch, phys });
        }

        for (arch, phys) in self.rat.mappings() {
            let produced = self
                .iter()
                .any(|(_, e)| e.rd == Some(arch) && e.dest == Some(phys));
            if !produced {
                return Err(AuditError::StaleMapping { arch, phys });
            }
        }
        Ok(())
    }
}
