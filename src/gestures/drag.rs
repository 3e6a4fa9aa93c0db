// Event drag gesture
// Moves a whole event onto another grid slot, duration preserved

use chrono::{DateTime, Duration, Local, NaiveDate};

use super::{ProposedTimes, SlotRef};
use crate::models::event::Event;
use crate::utils::time;

/// Snapshot of the event a drag picked up
#[derive(Clone, Debug)]
pub struct DragContext {
    pub event_id: String,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    pub duration: Duration,
    pub hovered_slot: Option<SlotRef>,
}

impl DragContext {
    fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            original_start: event.start,
            original_end: event.end,
            duration: event.duration(),
            hovered_slot: None,
        }
    }

    /// Start instant of the hovered slot within the given week
    pub fn hovered_start(&self, week_start: NaiveDate) -> Option<DateTime<Local>> {
        self.hovered_slot?.resolve(week_start)
    }
}

/// Owns the drag lifecycle: begin, hover updates, finish or cancel
///
/// The controller never touches the store; `finish` hands back a proposal
/// for the caller to route through the sync coordinator. Cancelling (or
/// dropping without a hover target) leaves no trace.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragContext>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick an event up
    ///
    /// Refused while another drag is active and for events that do not
    /// live on the time grid (all-day events, birthdays).
    pub fn begin(&mut self, event: &Event) -> bool {
        if self.active.is_some() {
            log::debug!("Drag begin ignored; another drag is active");
            return false;
        }
        if !event.is_interactive() {
            log::debug!("Drag begin ignored for ribbon event {}", event.id);
            return false;
        }
        log::debug!("Drag begin on event {}", event.id);
        self.active = Some(DragContext::from_event(event));
        true
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging_event(&self, event_id: &str) -> bool {
        self.active
            .as_ref()
            .map_or(false, |context| context.event_id == event_id)
    }

    /// Record the slot currently under the pointer
    pub fn update_hover(&mut self, slot: SlotRef) {
        if let Some(context) = self.active.as_mut() {
            context.hovered_slot = Some(slot);
        }
    }

    /// Drop the event, yielding a move proposal
    ///
    /// The proposal starts at the hovered slot (quantized) and keeps the
    /// original duration exactly. `None` when no gesture is active,
    /// nothing was hovered, the slot has no valid wall-clock instant, or
    /// the drop lands back on the original times. The gesture is consumed
    /// either way.
    pub fn finish(&mut self, week_start: NaiveDate, snap_minutes: u32) -> Option<ProposedTimes> {
        let context = self.active.take()?;
        let target = context.hovered_start(week_start)?;

        let start = time::quantize(target, snap_minutes);
        let end = start + context.duration;
        if start == context.original_start && end == context.original_end {
            log::debug!("Drag on event {} returned to its original slot", context.event_id);
            return None;
        }

        log::debug!(
            "Drag on event {} proposes {} -> {}",
            context.event_id,
            start,
            end
        );
        Some(ProposedTimes {
            event_id: context.event_id,
            start,
            end,
        })
    }

    /// Abort the gesture without proposing anything
    pub fn cancel(&mut self) {
        if let Some(context) = self.active.take() {
            log::debug!("Drag on event {} cancelled", context.event_id);
        }
    }
}
