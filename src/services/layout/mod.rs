// Layout service
// Turns one day's events into column-relative rectangles

pub mod overlap;
pub mod position;

pub use overlap::{group_overlapping, OverlapGroup};
pub use position::{position_rect, PositionRect};

use crate::models::event::Event;

/// Compute the day column geometry for a snapshot of events
///
/// Only timed events receive rects; all-day events and birthdays belong to
/// the ribbon and are skipped. Returns `(input index, rect)` pairs in
/// input order, one per timed event.
pub fn day_layout(events: &[Event], pixels_per_hour: f32) -> Vec<(usize, PositionRect)> {
    let timed: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.is_timed())
        .map(|(index, _)| index)
        .collect();
    let subset: Vec<Event> = timed.iter().map(|&index| events[index].clone()).collect();

    let groups = group_overlapping(&subset);

    let mut rects = Vec::with_capacity(subset.len());
    for group in &groups {
        for (rank, &sub_index) in group.indices().iter().enumerate() {
            rects.push((
                timed[sub_index],
                position_rect(&subset[sub_index], group.len(), rank, pixels_per_hour),
            ));
        }
    }
    rects.sort_by_key(|(index, _)| *index);
    rects
}
