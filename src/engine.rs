// Grid engine
// Facade wiring config, store, gestures and sync behind one surface

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use tokio::time::timeout;

use crate::config::GridConfig;
use crate::gestures::{DragController, ResizeController, ResizeOutcome, SlotRef};
use crate::models::event::Event;
use crate::models::mutation::{MutationTicket, PendingMutation};
use crate::services::layout::{self, PositionRect};
use crate::services::store::{EventStore, StoreError};
use crate::services::sync::remote::{RemoteCalendarClient, RemoteError, REMOTE_TIMEOUT_SECS};
use crate::services::sync::{AppliedMutation, Resolution, SyncCoordinator};
use crate::utils::time;

/// What a finished resize produced once routed through sync
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeCompletion {
    /// Time change applied optimistically; commit it with the ticket
    Applied(AppliedMutation),
    /// View-only width; nothing entered the store
    WidthHint { event_id: String, width_px: f32 },
}

/// How a driven commit resolved
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Remote accepted; the store holds the remote-normalized copy
    Committed(Event),
    /// The mutation was superseded or already resolved; the store is left
    /// to whoever owns the span now
    Stale,
    /// Remote failed; the previous span was restored
    Reverted(RemoteError),
}

/// Headless calendar grid
///
/// Owns the event store, the overlap layout, both gesture controllers and
/// the optimistic sync coordinator. Hosts feed it pointer state in grid
/// coordinates and render whatever `day_layout` hands back; time mutations
/// flow through `finish_drag`/`finish_resize` and resolve via `commit` or
/// the `confirm`/`reject` pair.
#[derive(Debug, Default)]
pub struct GridEngine {
    config: GridConfig,
    store: EventStore,
    coordinator: SyncCoordinator,
    drag: DragController,
    resize: ResizeController,
}

impl GridEngine {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            store: EventStore::new(),
            coordinator: SyncCoordinator::new(),
            drag: DragController::new(),
            resize: ResizeController::new(),
        }
    }

    /// Build an engine with a seeded store
    pub fn with_events(config: GridConfig, events: Vec<Event>) -> Self {
        let mut engine = Self::new(config);
        engine.store = EventStore::with_events(events);
        engine
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    pub fn add_event(&mut self, event: Event) -> Result<Event, StoreError> {
        self.store.insert(event)
    }

    /// First day of the displayed week containing `date`
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        time::week_start(date, self.config.first_day_of_week)
    }

    /// Lay out one day column
    ///
    /// Snapshot of the day's timed events paired with their rects, in
    /// store order. All-day events and birthdays are not part of the grid;
    /// fetch them with `ribbon_events`.
    pub fn day_layout(&self, date: NaiveDate) -> Vec<(Event, PositionRect)> {
        let events = self.store.events_for_day(date);
        layout::day_layout(&events, self.config.pixels_per_hour)
            .into_iter()
            .map(|(index, rect)| (events[index].clone(), rect))
            .collect()
    }

    /// The all-day and birthday slice for the ribbon above the grid
    pub fn ribbon_events(&self, date: NaiveDate) -> Vec<Event> {
        self.store
            .events_for_day(date)
            .into_iter()
            .filter(|event| !event.is_timed())
            .collect()
    }

    /// Pick an event up for dragging
    pub fn begin_drag(&mut self, event_id: &str) -> bool {
        if !self.admit_gesture(event_id) {
            return false;
        }
        match self.store.get(event_id) {
            Some(event) => self.drag.begin(event),
            None => {
                log::debug!("Drag begin ignored for unknown event {}", event_id);
                false
            }
        }
    }

    pub fn drag_hover(&mut self, slot: SlotRef) {
        self.drag.update_hover(slot);
    }

    /// Drop the dragged event, writing its new span optimistically
    pub fn finish_drag(&mut self, week_start: NaiveDate) -> Option<AppliedMutation> {
        let proposal = self.drag.finish(week_start, self.config.snap_minutes)?;
        self.coordinator.apply(
            &mut self.store,
            &proposal.event_id,
            proposal.start,
            proposal.end,
        )
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Grab the bottom edge of an event
    pub fn begin_resize(&mut self, event_id: &str) -> bool {
        if !self.admit_gesture(event_id) {
            return false;
        }
        match self.store.get(event_id) {
            Some(event) => self.resize.begin_vertical(event, &self.config),
            None => {
                log::debug!("Resize begin ignored for unknown event {}", event_id);
                false
            }
        }
    }

    pub fn resize_to_height(&mut self, height_px: f32) -> Option<DateTime<Local>> {
        self.resize.update_height(height_px)
    }

    /// Grab the right edge of an event
    ///
    /// Width hints never enter the store, so a pending mutation does not
    /// block them. An active gesture on the event still does.
    pub fn begin_width_resize(&mut self, event_id: &str, current_width_px: f32) -> bool {
        if self.gesture_active_on(event_id) {
            log::debug!(
                "Width resize on event {} refused while another gesture holds it",
                event_id
            );
            return false;
        }
        match self.store.get(event_id) {
            Some(event) => self.resize.begin_horizontal(event, current_width_px),
            None => {
                log::debug!("Width resize ignored for unknown event {}", event_id);
                false
            }
        }
    }

    pub fn resize_to_width(&mut self, width_px: f32) -> Option<f32> {
        self.resize.update_width(width_px)
    }

    /// Release the resized edge
    ///
    /// Time changes are written optimistically and come back as
    /// `Applied`; width changes come back as a plain hint.
    pub fn finish_resize(&mut self) -> Option<ResizeCompletion> {
        match self.resize.finish()? {
            ResizeOutcome::Times(proposal) => self
                .coordinator
                .apply(
                    &mut self.store,
                    &proposal.event_id,
                    proposal.start,
                    proposal.end,
                )
                .map(ResizeCompletion::Applied),
            ResizeOutcome::WidthHint { event_id, width_px } => {
                Some(ResizeCompletion::WidthHint { event_id, width_px })
            }
        }
    }

    pub fn cancel_resize(&mut self) {
        self.resize.cancel();
    }

    pub fn has_pending(&self, event_id: &str) -> bool {
        self.coordinator.has_pending(event_id)
    }

    pub fn pending_for(&self, event_id: &str) -> Option<&PendingMutation> {
        self.coordinator.pending_for(event_id)
    }

    /// Resolve a mutation whose remote write the host performed itself
    pub fn confirm(&mut self, ticket: &MutationTicket) -> Resolution {
        self.coordinator.confirm(ticket)
    }

    /// Revert a mutation whose remote write the host saw fail
    pub fn reject(&mut self, ticket: &MutationTicket) -> Resolution {
        self.coordinator.reject(&mut self.store, ticket)
    }

    /// Drive one applied mutation through the remote calendar
    ///
    /// The upsert runs under a 10 second budget. Success folds the
    /// remote-normalized copy into the store; failure restores the
    /// previous span. A mutation superseded before or during the flight
    /// resolves `Stale`: no traffic starts for a dead intent and a late
    /// remote result is dropped.
    pub async fn commit(
        &mut self,
        client: &dyn RemoteCalendarClient,
        applied: &AppliedMutation,
        account_id: &str,
    ) -> CommitOutcome {
        if !self.coordinator.begin_commit(&applied.ticket) {
            return CommitOutcome::Stale;
        }

        let result = match timeout(
            Duration::from_secs(REMOTE_TIMEOUT_SECS),
            client.upsert_event(&applied.event, account_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(REMOTE_TIMEOUT_SECS)),
        };

        match result {
            Ok(remote_event) => match self.coordinator.confirm(&applied.ticket) {
                Resolution::Committed => {
                    self.store.replace(remote_event.clone());
                    CommitOutcome::Committed(remote_event)
                }
                _ => CommitOutcome::Stale,
            },
            Err(err) => {
                log::error!(
                    "Remote commit for event {} failed: {}",
                    applied.ticket.event_id,
                    err
                );
                match self.coordinator.reject(&mut self.store, &applied.ticket) {
                    Resolution::Reverted => CommitOutcome::Reverted(err),
                    _ => CommitOutcome::Stale,
                }
            }
        }
    }

    /// Remove an event locally and from its remote calendar
    ///
    /// The local copy goes first so the grid updates immediately, and any
    /// live mutation on the event is discarded. Remote `NotFound` counts
    /// as success; any other remote failure reinserts the event and
    /// surfaces the error. Events without a remote link are removed
    /// locally only. `Ok(None)` for unknown ids.
    pub async fn delete(
        &mut self,
        client: &dyn RemoteCalendarClient,
        event_id: &str,
    ) -> Result<Option<Event>, RemoteError> {
        let Some(event) = self.store.remove(event_id) else {
            log::debug!("Delete requested for unknown event {}", event_id);
            return Ok(None);
        };
        self.coordinator.discard(event_id);

        let Some(link) = event.remote.as_ref() else {
            log::debug!("Removed local-only event {}", event_id);
            return Ok(Some(event));
        };

        let result = match timeout(
            Duration::from_secs(REMOTE_TIMEOUT_SECS),
            client.delete_event(&link.google_event_id, &link.google_calendar_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(REMOTE_TIMEOUT_SECS)),
        };

        match result {
            Ok(()) => Ok(Some(event)),
            Err(RemoteError::NotFound) => {
                log::debug!("Event {} was already gone remotely", event_id);
                Ok(Some(event))
            }
            Err(err) => {
                log::error!("Remote delete for event {} failed: {}", event_id, err);
                self.store.replace(event);
                Err(err)
            }
        }
    }

    fn admit_gesture(&self, event_id: &str) -> bool {
        if self.gesture_active_on(event_id) {
            log::debug!(
                "Gesture on event {} refused while another gesture holds it",
                event_id
            );
            return false;
        }
        if self.coordinator.has_pending(event_id) {
            log::debug!(
                "Gesture on event {} deferred until its pending mutation resolves",
                event_id
            );
            return false;
        }
        true
    }

    /// An event holds at most one active gesture at a time, across the
    /// drag and both resize axes
    fn gesture_active_on(&self, event_id: &str) -> bool {
        self.drag.is_dragging_event(event_id) || self.resize.is_resizing_event(event_id)
    }
}
