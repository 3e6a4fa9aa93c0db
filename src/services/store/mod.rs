// Event store service
// In-memory owner of canonical event state

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::models::event::Event;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("an event with id {0} already exists")]
    DuplicateId(String),
}

/// In-memory event collection with snapshot reads
///
/// The store is the single mutable owner of canonical event state; hosts
/// construct one and pass it explicitly to whatever needs it. Reads hand
/// out clones, so a snapshot never observes later writes. Insertion order
/// is preserved and feeds the layout tie-break for equal start times.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Seed a store from a batch; duplicate ids keep the first occurrence
    pub fn with_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        for event in events {
            if let Err(err) = store.insert(event) {
                log::warn!("Skipping seed event: {}", err);
            }
        }
        store
    }

    /// Add a new event, stamping `created_at`
    pub fn insert(&mut self, mut event: Event) -> Result<Event, StoreError> {
        if self.index_of(&event.id).is_some() {
            return Err(StoreError::DuplicateId(event.id));
        }
        if event.created_at.is_none() {
            event.created_at = Some(Local::now());
        }
        let stored = event.clone();
        self.events.push(event);
        Ok(stored)
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.index_of(id)?;
        Some(self.events.remove(index))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Rewrite an event's time span in place, stamping `updated_at`
    ///
    /// Returns the updated copy, or `None` for unknown ids and inverted
    /// spans (both logged, neither written).
    pub fn update_times(
        &mut self,
        id: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Option<Event> {
        if end <= start {
            log::warn!("Refusing inverted time span for event {}", id);
            return None;
        }
        match self.index_of(id) {
            Some(index) => {
                let event = &mut self.events[index];
                event.start = start;
                event.end = end;
                event.updated_at = Some(Local::now());
                Some(event.clone())
            }
            None => {
                log::warn!("Time update for unknown event {}", id);
                None
            }
        }
    }

    /// Upsert by id, stamping `updated_at`
    ///
    /// Returns whether an existing event was replaced. The replacement
    /// keeps the original `created_at` when the incoming copy lacks one.
    pub fn replace(&mut self, mut event: Event) -> bool {
        event.updated_at = Some(Local::now());
        match self.index_of(&event.id) {
            Some(index) => {
                if event.created_at.is_none() {
                    event.created_at = self.events[index].created_at;
                }
                self.events[index] = event;
                true
            }
            None => {
                if event.created_at.is_none() {
                    event.created_at = Some(Local::now());
                }
                self.events.push(event);
                false
            }
        }
    }

    /// Snapshot of the events belonging to one day column
    ///
    /// Timed events belong to the date they start on (the grid clips them
    /// at the end of that day); all-day events and birthdays belong to
    /// every date their calendar span covers.
    pub fn events_for_day(&self, date: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| {
                if event.is_timed() {
                    event.start.date_naive() == date
                } else {
                    event.occupies(date)
                }
            })
            .cloned()
            .collect()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }
}
