// Sync service
// Optimistic mutation lifecycle around the event store

pub mod remote;

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::models::event::Event;
use crate::models::mutation::{MutationStatus, MutationTicket, PendingMutation, TimeSpan};
use crate::services::store::EventStore;

/// The optimistically updated event plus the ticket that resolves it
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedMutation {
    pub event: Event,
    pub ticket: MutationTicket,
}

/// How a reported commit outcome landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The ticket was current; the mutation is committed and discarded
    Committed,
    /// The ticket was current; the previous span was restored
    Reverted,
    /// The ticket refers to a superseded or resolved mutation; nothing
    /// was written
    Stale,
}

/// Tracks optimistic time mutations between local write and remote
/// resolution
///
/// `apply` is synchronous: the store reflects the new span before any
/// remote traffic starts, so callers can hand the returned payload to an
/// async commit without blocking input handling. At most one live
/// mutation exists per event; a newer `apply` supersedes the old one and
/// discards its revert capability (newest user intent wins). Outcomes
/// reported with a stale ticket are logged and dropped, which also makes
/// a duplicate revert harmless.
#[derive(Debug, Default)]
pub struct SyncCoordinator {
    generations: HashMap<String, u64>,
    live: HashMap<String, PendingMutation>,
}

impl SyncCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a proposed span through the store and register the mutation
    ///
    /// Returns `None` for unknown event ids and unusable spans; the store
    /// is left untouched in both cases.
    pub fn apply(
        &mut self,
        store: &mut EventStore,
        event_id: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Option<AppliedMutation> {
        let previous = match store.get(event_id) {
            Some(event) => TimeSpan::new(event.start, event.end),
            None => {
                log::warn!("Mutation requested for unknown event {}", event_id);
                return None;
            }
        };

        let updated = store.update_times(event_id, start, end)?;

        if let Some(prior) = self.live.get_mut(event_id) {
            prior.status = MutationStatus::Superseded;
            log::info!(
                "Mutation gen {} on event {} superseded; its revert is discarded",
                prior.generation,
                event_id
            );
        }

        let generation = self
            .generations
            .entry(event_id.to_string())
            .and_modify(|g| *g += 1)
            .or_insert(1);
        let generation = *generation;

        self.live.insert(
            event_id.to_string(),
            PendingMutation {
                event_id: event_id.to_string(),
                generation,
                previous,
                proposed: TimeSpan::new(updated.start, updated.end),
                status: MutationStatus::Applied,
            },
        );
        log::debug!(
            "Applied mutation gen {} on event {} ({} -> {})",
            generation,
            event_id,
            previous.start,
            updated.start
        );

        Some(AppliedMutation {
            event: updated,
            ticket: MutationTicket {
                event_id: event_id.to_string(),
                generation,
            },
        })
    }

    /// Mark the live mutation as in flight
    pub fn begin_commit(&mut self, ticket: &MutationTicket) -> bool {
        match self.live.get_mut(&ticket.event_id) {
            Some(mutation) if mutation.generation == ticket.generation => {
                mutation.status = MutationStatus::Committing;
                true
            }
            _ => {
                log::warn!(
                    "Stale commit start for event {} gen {} ignored",
                    ticket.event_id,
                    ticket.generation
                );
                false
            }
        }
    }

    /// Resolve a successful remote commit
    pub fn confirm(&mut self, ticket: &MutationTicket) -> Resolution {
        if !self.is_current(ticket) {
            log::warn!(
                "Stale confirmation for event {} gen {} dropped",
                ticket.event_id,
                ticket.generation
            );
            return Resolution::Stale;
        }

        if let Some(mut mutation) = self.live.remove(&ticket.event_id) {
            mutation.status = MutationStatus::Committed;
            log::info!(
                "Committed mutation gen {} on event {}",
                mutation.generation,
                mutation.event_id
            );
        }
        Resolution::Committed
    }

    /// Resolve a failed remote commit by restoring the previous span
    ///
    /// Stale tickets never write: once a mutation was superseded or
    /// resolved, its revert capability is gone.
    pub fn reject(&mut self, store: &mut EventStore, ticket: &MutationTicket) -> Resolution {
        if !self.is_current(ticket) {
            log::warn!(
                "Stale rejection for event {} gen {} dropped",
                ticket.event_id,
                ticket.generation
            );
            return Resolution::Stale;
        }

        if let Some(mut mutation) = self.live.remove(&ticket.event_id) {
            mutation.status = MutationStatus::Reverted;
            store.update_times(
                &mutation.event_id,
                mutation.previous.start,
                mutation.previous.end,
            );
            log::warn!(
                "Remote commit failed for event {}; previous times restored",
                mutation.event_id
            );
        }
        Resolution::Reverted
    }

    /// Drop the live mutation for an event without touching the store
    ///
    /// Used when the event itself is removed: from then on its tickets
    /// resolve `Stale`, so an in-flight commit can neither fold nor revert
    /// the deleted event back in.
    pub fn discard(&mut self, event_id: &str) -> bool {
        match self.live.remove(event_id) {
            Some(mutation) => {
                log::debug!(
                    "Discarded live mutation gen {} on event {}",
                    mutation.generation,
                    event_id
                );
                true
            }
            None => false,
        }
    }

    /// The live mutation for an event, if any
    pub fn pending_for(&self, event_id: &str) -> Option<&PendingMutation> {
        self.live.get(event_id)
    }

    pub fn has_pending(&self, event_id: &str) -> bool {
        self.live.contains_key(event_id)
    }

    fn is_current(&self, ticket: &MutationTicket) -> bool {
        matches!(
            self.live.get(&ticket.event_id),
            Some(mutation) if mutation.generation == ticket.generation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn store_with(id: &str, start_hour: u32) -> EventStore {
        let event = Event::builder()
            .id(id)
            .title("Meeting")
            .start(at(start_hour, 0))
            .end(at(start_hour + 1, 0))
            .build()
            .unwrap();
        EventStore::with_events(vec![event])
    }

    #[test]
    fn test_apply_unknown_event() {
        let mut store = EventStore::new();
        let mut coordinator = SyncCoordinator::new();

        assert!(coordinator
            .apply(&mut store, "ghost", at(9, 0), at(10, 0))
            .is_none());
        assert!(!coordinator.has_pending("ghost"));
    }

    #[test]
    fn test_apply_writes_store_and_registers() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();

        assert_eq!(applied.ticket.generation, 1);
        assert_eq!(applied.event.start, at(11, 0));
        assert_eq!(store.get("e1").unwrap().start, at(11, 0));

        let pending = coordinator.pending_for("e1").unwrap();
        assert_eq!(pending.status, MutationStatus::Applied);
        assert_eq!(pending.previous, TimeSpan::new(at(10, 0), at(11, 0)));
        assert_eq!(pending.proposed, TimeSpan::new(at(11, 0), at(12, 0)));
    }

    #[test]
    fn test_apply_rejects_inverted_span() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        assert!(coordinator
            .apply(&mut store, "e1", at(12, 0), at(11, 0))
            .is_none());
        assert_eq!(store.get("e1").unwrap().start, at(10, 0));
        assert!(!coordinator.has_pending("e1"));
    }

    #[test]
    fn test_confirm_discards_mutation() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        assert!(coordinator.begin_commit(&applied.ticket));

        assert_eq!(coordinator.confirm(&applied.ticket), Resolution::Committed);
        assert!(!coordinator.has_pending("e1"));
        assert_eq!(store.get("e1").unwrap().start, at(11, 0));
    }

    #[test]
    fn test_reject_restores_previous_span() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();

        assert_eq!(
            coordinator.reject(&mut store, &applied.ticket),
            Resolution::Reverted
        );
        let event = store.get("e1").unwrap();
        assert_eq!(event.start, at(10, 0));
        assert_eq!(event.end, at(11, 0));
        assert!(!coordinator.has_pending("e1"));
    }

    #[test]
    fn test_second_reject_is_stale() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        coordinator.reject(&mut store, &applied.ticket);

        // a later local edit must survive the duplicate rejection
        store.update_times("e1", at(14, 0), at(15, 0));
        assert_eq!(
            coordinator.reject(&mut store, &applied.ticket),
            Resolution::Stale
        );
        assert_eq!(store.get("e1").unwrap().start, at(14, 0));
    }

    #[test]
    fn test_supersede_discards_prior_revert() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let first = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        let second = coordinator
            .apply(&mut store, "e1", at(13, 0), at(14, 0))
            .unwrap();

        assert_eq!(second.ticket.generation, 2);
        let pending = coordinator.pending_for("e1").unwrap();
        // the new mutation reverts to the span it actually observed
        assert_eq!(pending.previous, TimeSpan::new(at(11, 0), at(12, 0)));

        // the superseded ticket lost its revert capability
        assert_eq!(
            coordinator.reject(&mut store, &first.ticket),
            Resolution::Stale
        );
        assert_eq!(store.get("e1").unwrap().start, at(13, 0));

        // rejecting the live mutation rolls back one step, not two
        assert_eq!(
            coordinator.reject(&mut store, &second.ticket),
            Resolution::Reverted
        );
        assert_eq!(store.get("e1").unwrap().start, at(11, 0));
    }

    #[test]
    fn test_confirm_after_supersede_is_stale() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let first = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        coordinator
            .apply(&mut store, "e1", at(13, 0), at(14, 0))
            .unwrap();

        assert_eq!(coordinator.confirm(&first.ticket), Resolution::Stale);
        assert!(coordinator.has_pending("e1"));
    }

    #[test]
    fn test_discard_makes_ticket_stale() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        assert!(coordinator.discard("e1"));
        assert!(!coordinator.discard("e1"));

        assert!(!coordinator.has_pending("e1"));
        assert_eq!(coordinator.confirm(&applied.ticket), Resolution::Stale);
        assert_eq!(
            coordinator.reject(&mut store, &applied.ticket),
            Resolution::Stale
        );
        // the optimistic write stays in place; nothing reverts it
        assert_eq!(store.get("e1").unwrap().start, at(11, 0));
    }

    #[test]
    fn test_begin_commit_stale_ticket() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        coordinator.confirm(&applied.ticket);

        assert!(!coordinator.begin_commit(&applied.ticket));
    }

    #[test]
    fn test_generations_are_per_event() {
        let mut store = store_with("e1", 10);
        store
            .insert(
                Event::builder()
                    .id("e2")
                    .title("Other")
                    .start(at(12, 0))
                    .end(at(13, 0))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let mut coordinator = SyncCoordinator::new();

        let a = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        let b = coordinator
            .apply(&mut store, "e2", at(14, 0), at(15, 0))
            .unwrap();

        assert_eq!(a.ticket.generation, 1);
        assert_eq!(b.ticket.generation, 1);
        assert_eq!(coordinator.pending_for("e1").unwrap().generation, 1);
        assert_eq!(coordinator.pending_for("e2").unwrap().generation, 1);
    }

    #[test]
    fn test_commit_status_transition() {
        let mut store = store_with("e1", 10);
        let mut coordinator = SyncCoordinator::new();

        let applied = coordinator
            .apply(&mut store, "e1", at(11, 0), at(12, 0))
            .unwrap();
        coordinator.begin_commit(&applied.ticket);

        assert_eq!(
            coordinator.pending_for("e1").unwrap().status,
            MutationStatus::Committing
        );
    }
}
