// Gesture state machines
// Pointer-driven interactions that end in time proposals

pub mod drag;
pub mod resize;

pub use drag::{DragContext, DragController};
pub use resize::{ResizeAxis, ResizeContext, ResizeController, ResizeOutcome};

use chrono::{DateTime, Local, NaiveDate};

use crate::utils::time;

/// One cell of the week grid: a day column plus a quantized wall-clock
/// position inside it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRef {
    pub day_index: usize,
    pub hour: u32,
    pub minute: u32,
}

impl SlotRef {
    pub fn new(day_index: usize, hour: u32, minute: u32) -> Self {
        Self {
            day_index,
            hour,
            minute,
        }
    }

    /// The wall-clock instant this slot names within a week
    pub fn resolve(&self, week_start: NaiveDate) -> Option<DateTime<Local>> {
        time::local_at(
            time::date_in_week(week_start, self.day_index),
            self.hour,
            self.minute,
        )
    }
}

/// Time change a finished gesture proposes for one event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposedTimes {
    pub event_id: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}
