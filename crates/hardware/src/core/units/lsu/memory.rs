//! Memory subsystem shared by the load/store units.
//!
//! Holds a sparse word-addressed memory, the store buffer in front of it and
//! the single load-reserved address. Loads see the youngest buffered store to
//! their address before memory. Stores only reach memory after commit.
//!
//! Reservation rules:
//! - `load_reserved` records the address.
//! - Any ordinary store to the reserved address, any successful
//!   store-conditional, and any `external_write` to it invalidates it.
//! - A store-conditional clears the reservation whether it succeeds or not.
//!
//! Accesses happen at issue, so the live reservation is speculative. Every
//! change made by an access is journaled under the instruction's sequence
//! number and replayed onto a committed copy when that instruction retires.
//! A flush restores the committed copy, so squashed loads and stores leave
//! no trace on it. External writes are not speculative and update both.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use super::store_buffer::StoreBuffer;
use crate::config::MemoryConfig;

/// A reservation change made by an access that has not retired yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReservationEvent {
    Reserve(u64),
    Invalidate(u64),
    Release,
}

impl ReservationEvent {
    const fn apply(self, reservation: &mut Option<u64>) {
        match self {
            Self::Reserve(addr) => *reservation = Some(addr),
            Self::Invalidate(addr) => {
                if matches!(*reservation, Some(held) if held == addr) {
                    *reservation = None;
                }
            }
            Self::Release => *reservation = None,
        }
    }
}

/// Memory, store buffer and reservation.
#[derive(Clone, Debug)]
pub struct MemorySubsystem {
    words: HashMap<u64, u64>,
    store_buffer: StoreBuffer,
    reservation: Option<u64>,
    committed_reservation: Option<u64>,
    journal: VecDeque<(u64, ReservationEvent)>,
    drain_per_cycle: usize,
}

impl MemorySubsystem {
    /// Creates an all-zero memory.
    pub fn new(store_buffer_size: usize, drain_per_cycle: usize) -> Self {
        Self {
            words: HashMap::new(),
            store_buffer: StoreBuffer::new(store_buffer_size),
            reservation: None,
            committed_reservation: None,
            journal: VecDeque::new(),
            drain_per_cycle: drain_per_cycle.max(1),
        }
    }

    /// Creates memory sized by `config`.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.store_buffer_size, config.drain_per_cycle)
    }

    /// Value in memory at `addr`, ignoring buffered stores.
    pub fn read(&self, addr: u64) -> u64 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Seeds memory directly. Does not touch the reservation.
    pub fn preload(&mut self, addr: u64, value: u64) {
        let _ = self.words.insert(addr, value);
    }

    /// A write from another agent: updates memory and breaks a matching reservation.
    pub fn external_write(&mut self, addr: u64, value: u64) {
        let _ = self.words.insert(addr, value);
        if self.reservation == Some(addr) {
            self.reservation = None;
            trace!(addr = format_args!("{addr:#x}"), "reservation invalidated");
        }
        ReservationEvent::Invalidate(addr).apply(&mut self.committed_reservation);
        // A pending load-reserved of this address must not resurrect it at retire.
        for (_, event) in &mut self.journal {
            if *event == ReservationEvent::Reserve(addr) {
                *event = ReservationEvent::Release;
            }
        }
    }

    /// Currently reserved address, as seen by the next access.
    #[inline]
    pub const fn reservation(&self) -> Option<u64> {
        self.reservation
    }

    /// Reserved address as of the last retired instruction.
    #[inline]
    pub const fn committed_reservation(&self) -> Option<u64> {
        self.committed_reservation
    }

    /// The store buffer.
    #[inline]
    pub const fn store_buffer(&self) -> &StoreBuffer {
        &self.store_buffer
    }

    /// A store could be buffered now.
    #[inline]
    pub fn can_buffer_store(&self) -> bool {
        !self.store_buffer.is_full()
    }

    /// Loads `addr`, forwarding from the store buffer.
    pub fn load(&self, addr: u64) -> u64 {
        self.store_buffer
            .forward_load(addr)
            .unwrap_or_else(|| self.read(addr))
    }

    /// Loads `addr` and reserves it on behalf of instruction `seq`.
    pub fn load_reserved(&mut self, seq: u64, addr: u64) -> u64 {
        self.record(seq, ReservationEvent::Reserve(addr));
        trace!(addr = format_args!("{addr:#x}"), "reservation set");
        self.load(addr)
    }

    /// Buffers an ordinary store. Returns false when the store buffer is full.
    pub fn store(&mut self, seq: u64, addr: u64, data: u64) -> bool {
        if !self.store_buffer.allocate(seq, addr, data) {
            return false;
        }
        if self.reservation == Some(addr) {
            trace!(addr = format_args!("{addr:#x}"), "reservation invalidated");
        }
        self.record(seq, ReservationEvent::Invalidate(addr));
        true
    }

    /// Attempts a store-conditional. Returns whether it succeeded.
    pub fn store_conditional(&mut self, seq: u64, addr: u64, data: u64) -> bool {
        let reserved = self.reservation == Some(addr);
        self.record(seq, ReservationEvent::Release);
        let success = reserved && self.store_buffer.allocate(seq, addr, data);
        trace!(addr = format_args!("{addr:#x}"), success, "store-conditional");
        success
    }

    /// Retires memory instruction `seq`: its buffered store becomes
    /// drainable and its reservation changes reach the committed copy.
    ///
    /// Returns whether a buffered store was committed.
    pub fn commit(&mut self, seq: u64) -> bool {
        while let Some(&(event_seq, event)) = self.journal.front() {
            if event_seq > seq {
                break;
            }
            event.apply(&mut self.committed_reservation);
            let _ = self.journal.pop_front();
        }
        self.store_buffer.mark_committed(seq)
    }

    /// Writes up to `drain_per_cycle` committed stores to memory.
    ///
    /// Returns the number drained.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while drained < self.drain_per_cycle {
            let Some(entry) = self.store_buffer.drain_one() else {
                break;
            };
            let _ = self.words.insert(entry.addr, entry.data);
            drained += 1;
        }
        drained
    }

    /// Drops speculative stores and rolls the reservation back to its committed state.
    pub fn flush_speculative(&mut self) {
        self.store_buffer.flush_speculative();
        self.journal.clear();
        self.reservation = self.committed_reservation;
    }

    /// No store is waiting to reach memory.
    #[inline]
    pub const fn is_drained(&self) -> bool {
        self.store_buffer.is_empty()
    }

    fn record(&mut self, seq: u64, event: ReservationEvent) {
        event.apply(&mut self.reservation);
        self.journal.push_back((seq, event));
    }
}
