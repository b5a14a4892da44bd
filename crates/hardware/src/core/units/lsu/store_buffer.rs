//! Store Buffer for deferred memory writes.
//!
//! Stores are not written to memory until they commit from the window. The
//! store buffer holds resolved stores and provides:
//! 1. **Allocation:** Records a store's address and data when it executes.
//! 2. **Forwarding:** Supplies the youngest buffered value to a load of the same address.
//! 3. **Commit:** Marks entries as committed when the window retires the store.
//! 4. **Drain:** Removes committed stores, oldest first, so they can be written to memory.
//! 5. **Flush:** Drops every uncommitted entry; committed entries still drain.

/// Lifecycle state of a store buffer entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreState {
    /// Address and data resolved, waiting for commit.
    #[default]
    Speculative,
    /// The window has retired this store; it can be drained to memory.
    Committed,
}

/// A single entry in the store buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreBufferEntry {
    /// Sequence number of the store instruction.
    pub seq: u64,
    /// Target address.
    pub addr: u64,
    /// Data to store.
    pub data: u64,
    /// Current lifecycle state.
    pub state: StoreState,
    /// Whether this slot is occupied.
    pub valid: bool,
}

/// Store buffer: FIFO queue of executed stores.
#[derive(Clone, Debug)]
pub struct StoreBuffer {
    entries: Vec<StoreBufferEntry>,
    /// Index of the oldest entry.
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
}

impl StoreBuffer {
    /// Creates a new store buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![StoreBufferEntry::default(); capacity.max(1)],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the store buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the store buffer is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.entries.len() - self.count
    }

    /// Buffers an executed store. Returns false if the buffer is full.
    pub fn allocate(&mut self, seq: u64, addr: u64, data: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries[self.tail] = StoreBufferEntry {
            seq,
            addr,
            data,
            state: StoreState::Speculative,
            valid: true,
        };
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        true
    }

    /// Marks the store with sequence number `seq` as committed.
    ///
    /// Returns whether such a store was buffered (a failed store-conditional
    /// never is).
    pub fn mark_committed(&mut self, seq: u64) -> bool {
        match self.iter_mut().find(|e| e.seq == seq) {
            Some(entry) => {
                entry.state = StoreState::Committed;
                true
            }
            None => false,
        }
    }

    /// Youngest buffered data for `addr`, if any store to it is pending.
    pub fn forward_load(&self, addr: u64) -> Option<u64> {
        let cap = self.entries.len();
        (0..self.count)
            .rev()
            .map(|i| &self.entries[(self.head + i) % cap])
            .find(|e| e.valid && e.addr == addr)
            .map(|e| e.data)
    }

    /// Drains (removes) the oldest committed store. Returns it so the caller
    /// can write it to memory. Returns `None` if the oldest store has not
    /// committed yet.
    pub fn drain_one(&mut self) -> Option<StoreBufferEntry> {
        if self.count == 0 {
            return None;
        }
        let entry = self.entries[self.head];
        if !entry.valid || entry.state != StoreState::Committed {
            return None;
        }
        self.entries[self.head].valid = false;
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some(entry)
    }

    /// Flushes speculative (non-committed) entries. Committed entries remain.
    ///
    /// Committed entries are always older than speculative ones, so this only
    /// ever trims the young end of the queue.
    pub fn flush_speculative(&mut self) {
        let cap = self.entries.len();
        let committed = (0..self.count)
            .take_while(|i| self.entries[(self.head + i) % cap].state == StoreState::Committed)
            .count();
        for i in committed..self.count {
            self.entries[(self.head + i) % cap].valid = false;
        }
        self.count = committed;
        self.tail = (self.head + committed) % cap;
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut StoreBufferEntry> + '_ {
        self.entries.iter_mut().filter(|e| e.valid)
    }
}
