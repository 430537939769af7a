//! Per-entity sequence numbers for in-flight remote calls.
//!
//! A ticket is taken when a mutation is applied to the store. When the
//! remote answer arrives, the ticket is checked: if a newer mutation of the
//! same entity has been applied since, the answer is stale and must not
//! touch the store.

use kanban_domain::{BoardId, TaskId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Board(BoardId),
    /// A task's fields and its existence.
    Task(TaskId),
    /// Which column a task sits in, and where.
    TaskPlacement(TaskId),
    /// Fetch of a board's columns and tasks.
    BoardLoad(BoardId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: EntityKey,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct Sequencer {
    next: u64,
    latest: HashMap<EntityKey, u64>,
    issued: HashMap<EntityKey, u64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket, superseding every earlier ticket for the same key.
    pub fn issue(&mut self, key: EntityKey) -> Ticket {
        self.next += 1;
        self.latest.insert(key.clone(), self.next);
        self.issued.insert(key.clone(), self.next);
        Ticket {
            key,
            seq: self.next,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.seq)
    }

    /// Retire a ticket once its mutation has settled. Superseded tickets
    /// leave the newer entry in place.
    pub fn finish(&mut self, ticket: &Ticket) {
        if self.is_current(ticket) {
            self.latest.remove(&ticket.key);
        }
    }

    /// Make every outstanding ticket for `key` stale without starting a new
    /// mutation.
    pub fn supersede(&mut self, key: EntityKey) {
        self.next += 1;
        self.latest.remove(&key);
        self.issued.insert(key, self.next);
    }

    /// Sequence number of the newest ticket ever issued for `key`, settled
    /// or not.
    pub fn last_issued(&self, key: &EntityKey) -> Option<u64> {
        self.issued.get(key).copied()
    }

    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }
}
