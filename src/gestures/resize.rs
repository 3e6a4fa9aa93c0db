// Event resize gesture
// Vertical drags move the end edge; horizontal drags only hint a width

use chrono::{DateTime, Duration, Local};

use super::ProposedTimes;
use crate::config::GridConfig;
use crate::models::event::Event;
use crate::utils::time;

/// Which direction the active resize moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeAxis {
    /// Bottom edge; adjusts the end time
    Vertical,
    /// Right edge; adjusts only the rendered width
    Horizontal,
}

/// Narrowest width hint a horizontal resize may produce
pub const MIN_WIDTH_HINT_PX: f32 = 20.0;

/// Snapshot of the event an active resize is shaping
#[derive(Clone, Debug)]
pub struct ResizeContext {
    pub event_id: String,
    pub axis: ResizeAxis,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    /// Last accepted end proposal (vertical axis)
    pub proposed_end: DateTime<Local>,
    /// Width at gesture start (horizontal axis)
    pub original_width_px: f32,
    /// Current width hint (horizontal axis)
    pub width_hint_px: f32,
    pixels_per_hour: f32,
    snap_minutes: u32,
    min_minutes: i64,
}

/// What a finished resize hands back
#[derive(Clone, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// New times to persist through the sync coordinator
    Times(ProposedTimes),
    /// View-only width; never persisted, never committed
    WidthHint { event_id: String, width_px: f32 },
}

/// Owns the resize lifecycle for one gesture at a time
///
/// Vertical updates compute `end = start + dragged height` quantized to
/// the snap step. Candidates below the minimum duration are rejected and
/// the last valid proposal stays in place, so a drag that never reaches a
/// valid height finishes as a no-op.
#[derive(Debug, Default)]
pub struct ResizeController {
    active: Option<ResizeContext>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grab the bottom edge of an event
    pub fn begin_vertical(&mut self, event: &Event, config: &GridConfig) -> bool {
        if !self.admit(event) {
            return false;
        }
        self.active = Some(ResizeContext {
            event_id: event.id.clone(),
            axis: ResizeAxis::Vertical,
            original_start: event.start,
            original_end: event.end,
            proposed_end: event.end,
            original_width_px: 0.0,
            width_hint_px: 0.0,
            pixels_per_hour: config.pixels_per_hour,
            snap_minutes: config.snap_minutes,
            min_minutes: config.min_event_minutes,
        });
        true
    }

    /// Grab the right edge of an event
    pub fn begin_horizontal(&mut self, event: &Event, current_width_px: f32) -> bool {
        if !self.admit(event) {
            return false;
        }
        let width = current_width_px.max(MIN_WIDTH_HINT_PX);
        self.active = Some(ResizeContext {
            event_id: event.id.clone(),
            axis: ResizeAxis::Horizontal,
            original_start: event.start,
            original_end: event.end,
            proposed_end: event.end,
            original_width_px: width,
            width_hint_px: width,
            pixels_per_hour: 0.0,
            snap_minutes: 0,
            min_minutes: 0,
        });
        true
    }

    pub fn active(&self) -> Option<&ResizeContext> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_resizing_event(&self, event_id: &str) -> bool {
        self.active
            .as_ref()
            .map_or(false, |context| context.event_id == event_id)
    }

    /// Feed the current dragged height of a vertical resize
    ///
    /// Returns the end the block should render with: the new proposal
    /// when the height maps to an acceptable duration, otherwise the
    /// retained previous one. `None` when no vertical resize is active.
    pub fn update_height(&mut self, height_px: f32) -> Option<DateTime<Local>> {
        let context = self.active.as_mut()?;
        if context.axis != ResizeAxis::Vertical {
            return None;
        }

        if height_px.is_finite() && height_px > 0.0 {
            let raw_minutes = (height_px / context.pixels_per_hour * 60.0).round() as i64;
            let candidate = time::quantize(
                context.original_start + Duration::minutes(raw_minutes),
                context.snap_minutes,
            );
            // both the raw drag and the snapped result must clear the
            // minimum, otherwise the previous valid end stays
            if raw_minutes >= context.min_minutes
                && candidate - context.original_start >= Duration::minutes(context.min_minutes)
            {
                context.proposed_end = candidate;
            }
        }

        Some(context.proposed_end)
    }

    /// Feed the current dragged width of a horizontal resize
    pub fn update_width(&mut self, width_px: f32) -> Option<f32> {
        let context = self.active.as_mut()?;
        if context.axis != ResizeAxis::Horizontal {
            return None;
        }

        if width_px.is_finite() {
            context.width_hint_px = width_px.max(MIN_WIDTH_HINT_PX);
        }
        Some(context.width_hint_px)
    }

    /// Release the edge
    ///
    /// Vertical resizes yield times only when the proposal differs from
    /// the original end; horizontal ones yield a width hint only when the
    /// width actually changed. `None` means nothing to do.
    pub fn finish(&mut self) -> Option<ResizeOutcome> {
        let context = self.active.take()?;
        match context.axis {
            ResizeAxis::Vertical => {
                if context.proposed_end == context.original_end {
                    log::debug!("Resize on event {} left times unchanged", context.event_id);
                    return None;
                }
                log::debug!(
                    "Resize on event {} proposes end {}",
                    context.event_id,
                    context.proposed_end
                );
                Some(ResizeOutcome::Times(ProposedTimes {
                    event_id: context.event_id,
                    start: context.original_start,
                    end: context.proposed_end,
                }))
            }
            ResizeAxis::Horizontal => {
                if (context.width_hint_px - context.original_width_px).abs() < f32::EPSILON {
                    return None;
                }
                Some(ResizeOutcome::WidthHint {
                    event_id: context.event_id,
                    width_px: context.width_hint_px,
                })
            }
        }
    }

    /// Abort the gesture without proposing anything
    pub fn cancel(&mut self) {
        if let Some(context) = self.active.take() {
            log::debug!("Resize on event {} cancelled", context.event_id);
        }
    }

    fn admit(&self, event: &Event) -> bool {
        if self.active.is_some() {
            log::debug!("Resize begin ignored; another resize is active");
            return false;
        }
        if !event.is_interactive() {
            log::debug!("Resize begin ignored for ribbon event {}", event.id);
            return false;
        }
        true
    }
}
