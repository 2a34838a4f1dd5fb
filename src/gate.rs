//! # The Concurrency Gate
//!
//! A counting admission gate that caps how many work units run at once.
//! `acquire` blocks while all slots are taken and hands back an RAII
//! [`Permit`]; dropping the permit frees the slot and wakes one waiter, so a
//! slot is released on every exit path from a unit, including panics.
//!
//! Deliberately a counting resource rather than a channel: occupancy is
//! observable, which is what the dispatcher tests instrument to verify the
//! bound holds.

use std::sync::{Arc, Condvar, Mutex};

/// Bounded counting resource with capacity fixed at construction.
///
/// Invariant: the number of live [`Permit`]s never exceeds the capacity.
#[derive(Debug)]
pub struct Gate {
    capacity: usize,
    occupied: Mutex<usize>,
    freed: Condvar,
}

impl Gate {
    /// Create a gate with the given capacity, clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        Gate {
            capacity: capacity.max(1),
            occupied: Mutex::new(0),
            freed: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently out.
    pub fn occupancy(&self) -> usize {
        *self.occupied.lock().unwrap()
    }

    /// Block until a slot is free, then take it.
    ///
    /// Consumes an `Arc` handle (clone one to keep using the gate) so the
    /// permit owns its gate and can travel into a worker thread.
    pub fn acquire(self: Arc<Self>) -> Permit {
        {
            let mut occupied = self.occupied.lock().unwrap();
            while *occupied >= self.capacity {
                occupied = self.freed.wait(occupied).unwrap();
            }
            *occupied += 1;
        }
        Permit { gate: self }
    }

    fn release(&self) {
        let mut occupied = self.occupied.lock().unwrap();
        *occupied -= 1;
        self.freed.notify_one();
    }
}

/// A held gate slot. Dropping it releases the slot.
#[must_use = "dropping the permit immediately releases the slot"]
pub struct Permit {
    gate: Arc<Gate>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.gate.release();
    }
}
