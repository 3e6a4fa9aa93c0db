// Mutation module
// Bookkeeping types for optimistic event-time mutations

use chrono::{DateTime, Local};

/// A start/end pair snapshotted from an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Lifecycle of one optimistic mutation
///
/// `Applied` and `Committing` are live states; the other three are
/// terminal, after which the mutation is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// Written to the local store, not yet sent
    Applied,
    /// Remote commit in flight
    Committing,
    /// Remote accepted the change
    Committed,
    /// Remote rejected the change; the previous span was restored
    Reverted,
    /// A newer mutation for the same event replaced this one
    Superseded,
}

impl MutationStatus {
    pub fn is_terminal(&self) -> bool {
        match self {
            MutationStatus::Applied | MutationStatus::Committing => false,
            MutationStatus::Committed
            | MutationStatus::Reverted
            | MutationStatus::Superseded => true,
        }
    }
}

/// One optimistic mutation owned by the sync coordinator
///
/// `previous` is the span the event held when the mutation was applied;
/// a revert restores exactly that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub event_id: String,
    pub generation: u64,
    pub previous: TimeSpan,
    pub proposed: TimeSpan,
    pub status: MutationStatus,
}

/// Capability handed to an async commit driver
///
/// The generation stamps which mutation the ticket belongs to; outcomes
/// reported with a stale generation are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    pub event_id: String,
    pub generation: u64,
}
