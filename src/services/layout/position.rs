// Block geometry
// Column-relative rectangle math for timed events

use chrono::Timelike;

use crate::models::event::Event;

/// Widest a block may render; the remainder stays as a visual gutter
pub const MAX_WIDTH_PCT: f32 = 95.0;
/// Horizontal spacing between stacked group columns
pub const COLUMN_GUTTER_PCT: f32 = 1.0;
/// Shortest block still tall enough to read and grab
pub const MIN_BLOCK_HEIGHT_PX: f32 = 20.0;

const HOURS_PER_DAY: f32 = 24.0;

/// Column-relative placement of one event block
///
/// `top`/`height` are pixels from the top of the day column; the
/// horizontal fields are percentages of the column width. `max_width_pct`
/// and `min_width_pct` carry the same value and map onto independent
/// host-side constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRect {
    pub top: f32,
    pub height: f32,
    pub left_pct: f32,
    pub max_width_pct: f32,
    pub min_width_pct: f32,
    pub z_index: u32,
}

impl PositionRect {
    /// Fixed rect for events whose time span is unusable
    pub fn fallback() -> Self {
        Self {
            top: 0.0,
            height: MIN_BLOCK_HEIGHT_PX,
            left_pct: 0.0,
            max_width_pct: MAX_WIDTH_PCT,
            min_width_pct: MAX_WIDTH_PCT,
            z_index: 1,
        }
    }

    /// Pixel offset of the block's bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Percentage offset of the block's right edge
    pub fn right_pct(&self) -> f32 {
        self.left_pct + self.max_width_pct
    }
}

/// Place one event given its group cardinality and start-order rank
///
/// Group members split the column evenly up to the 95% cap and stagger by
/// one gutter per rank; when a crowded group cannot afford full gutters,
/// the stride tightens so the last rank still ends at the column edge and
/// no two members overlap horizontally. Height is floored so tiny events
/// stay grabbable and capped so no block runs past the end of the day;
/// the cap wins when the two conflict. Later-starting members paint above
/// earlier ones.
///
/// A degenerate span (`end <= start`) yields the fallback rect instead of
/// panicking, so one malformed event never takes down its siblings.
pub fn position_rect(
    event: &Event,
    group_size: usize,
    index_in_group: usize,
    pixels_per_hour: f32,
) -> PositionRect {
    if event.end <= event.start {
        log::warn!(
            "Unusable time span on event {}; placing fallback rect",
            event.id
        );
        return PositionRect::fallback();
    }

    let width = (MAX_WIDTH_PCT / group_size.max(1) as f32).min(MAX_WIDTH_PCT);
    // full-gutter strides overflow the column once the group is crowded
    // enough; the last rank must still fit inside it without landing on
    // its neighbour
    let stride = if group_size > 1 {
        (width + COLUMN_GUTTER_PCT).min((100.0 - width) / (group_size - 1) as f32)
    } else {
        width + COLUMN_GUTTER_PCT
    };
    let left = (index_in_group as f32 * stride).min(100.0 - width);

    let start = event.start;
    let top = (start.hour() as f32 + start.minute() as f32 / 60.0) * pixels_per_hour;

    let duration_minutes = event.duration().num_seconds() as f32 / 60.0;
    let max_height = HOURS_PER_DAY * pixels_per_hour - top;
    let height = (duration_minutes / 60.0 * pixels_per_hour)
        .max(MIN_BLOCK_HEIGHT_PX)
        .min(max_height);

    PositionRect {
        top,
        height,
        left_pct: left,
        max_width_pct: width,
        min_width_pct: width,
        z_index: index_in_group as u32 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};

    const PPH: f32 = 60.0;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn event(start: (u32, u32), end: (u32, u32)) -> Event {
        Event::builder()
            .id("e")
            .title("Block")
            .start(at(start.0, start.1))
            .end(at(end.0, end.1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_event_full_width() {
        let rect = position_rect(&event((9, 0), (10, 0)), 1, 0, PPH);
        assert_eq!(rect.max_width_pct, 95.0);
        assert_eq!(rect.min_width_pct, 95.0);
        assert_eq!(rect.left_pct, 0.0);
        assert_eq!(rect.z_index, 1);
    }

    #[test]
    fn test_pair_splits_column() {
        let first = position_rect(&event((9, 0), (10, 0)), 2, 0, PPH);
        let second = position_rect(&event((9, 30), (10, 30)), 2, 1, PPH);

        assert_eq!(first.max_width_pct, 47.5);
        assert_eq!(first.left_pct, 0.0);
        assert_eq!(second.max_width_pct, 47.5);
        assert_eq!(second.left_pct, 48.5);
        assert!(second.right_pct() <= 100.0);
        assert_eq!(first.z_index, 1);
        assert_eq!(second.z_index, 2);
    }

    #[test]
    fn test_top_tracks_start_time() {
        let rect = position_rect(&event((9, 30), (10, 30)), 1, 0, PPH);
        assert_eq!(rect.top, 570.0);
    }

    #[test]
    fn test_height_tracks_duration() {
        let rect = position_rect(&event((9, 0), (11, 30)), 1, 0, PPH);
        assert_eq!(rect.height, 150.0);
    }

    #[test]
    fn test_height_floor() {
        // five minutes would be 5px; the floor keeps it grabbable
        let rect = position_rect(&event((9, 0), (9, 5)), 1, 0, PPH);
        assert_eq!(rect.height, MIN_BLOCK_HEIGHT_PX);
    }

    #[test]
    fn test_height_capped_at_end_of_day() {
        // started at 22:00 with a span written past midnight
        let mut overnight = event((22, 0), (23, 0));
        overnight.end = at(23, 0) + chrono::Duration::hours(4);

        let rect = position_rect(&overnight, 1, 0, PPH);
        assert_eq!(rect.bottom(), 24.0 * PPH);
    }

    #[test]
    fn test_cap_beats_floor_near_midnight() {
        let rect = position_rect(&event((23, 45), (23, 59)), 1, 0, PPH);
        assert!(rect.height < MIN_BLOCK_HEIGHT_PX);
        assert!(rect.bottom() <= 24.0 * PPH);
    }

    #[test]
    fn test_crowded_group_tightens_stride() {
        // rank 9 of 10 would stagger past the right edge on full gutters
        let rects: Vec<PositionRect> = (0..10)
            .map(|rank| position_rect(&event((9, 0), (10, 0)), 10, rank, PPH))
            .collect();

        assert!(rects[9].right_pct() <= 100.0);
        for pair in rects.windows(2) {
            assert!(pair[0].right_pct() <= pair[1].left_pct);
        }
    }

    #[test]
    fn test_eight_member_group_stays_disjoint() {
        let rects: Vec<PositionRect> = (0..8)
            .map(|rank| position_rect(&event((9, 0), (10, 0)), 8, rank, PPH))
            .collect();

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(
                    a.right_pct() <= b.left_pct || b.right_pct() <= a.left_pct,
                    "ranks overlap horizontally: [{}, {}) vs [{}, {})",
                    a.left_pct,
                    a.right_pct(),
                    b.left_pct,
                    b.right_pct()
                );
            }
        }
    }

    #[test]
    fn test_small_groups_keep_full_gutters() {
        // six members is the densest group a full gutter still fits
        let five = position_rect(&event((9, 0), (10, 0)), 6, 5, PPH);
        let width = 95.0 / 6.0;
        assert!((five.left_pct - 5.0 * (width + COLUMN_GUTTER_PCT)).abs() < 1e-3);
        assert!(five.right_pct() <= 100.0);
    }

    #[test]
    fn test_degenerate_span_falls_back() {
        let mut broken = event((9, 0), (10, 0));
        broken.end = broken.start;

        let rect = position_rect(&broken, 3, 2, PPH);
        assert_eq!(rect, PositionRect::fallback());
    }

    #[test]
    fn test_inverted_span_falls_back() {
        let mut broken = event((9, 0), (10, 0));
        broken.end = broken.start - chrono::Duration::hours(1);

        assert_eq!(position_rect(&broken, 1, 0, PPH), PositionRect::fallback());
    }

    #[test]
    fn test_scales_with_pixels_per_hour() {
        let rect = position_rect(&event((6, 0), (7, 0)), 1, 0, 120.0);
        assert_eq!(rect.top, 720.0);
        assert_eq!(rect.height, 120.0);
    }
}
