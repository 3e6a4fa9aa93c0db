//! Pure time/pixel conversion helpers for the day grid.
//!
//! All math runs in the local timezone. Functions that must construct a
//! wall-clock instant return `Option` and yield `None` for instants the
//! local timezone skips (DST gaps); callers treat that as "no valid
//! proposal".

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Timelike};

/// Default gesture quantization step
pub const SNAP_MINUTES: u32 = 15;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Wall-clock minutes since midnight
pub fn minutes_from_midnight(t: DateTime<Local>) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Pixel offset of a time from the top of its day column
pub fn grid_offset(t: DateTime<Local>, pixels_per_hour: f32) -> f32 {
    minutes_from_midnight(t) as f32 / 60.0 * pixels_per_hour
}

/// Wall-clock instant at a pixel offset within a day column
///
/// The offset is clamped to the day, so negative values resolve to
/// midnight and values past the bottom edge to 23:59.
pub fn time_at_offset(day: NaiveDate, y: f32, pixels_per_hour: f32) -> Option<DateTime<Local>> {
    let raw = (y / pixels_per_hour * 60.0).round() as i64;
    let minutes = raw.clamp(0, MINUTES_PER_DAY - 1);
    local_at(day, (minutes / 60) as u32, (minutes % 60) as u32)
}

/// Round an instant to the nearest `step_minutes` boundary
///
/// Halves round up; seconds and sub-second precision are dropped. The
/// result may carry into the next day (23:59 at step 15 becomes 00:00).
pub fn quantize(t: DateTime<Local>, step_minutes: u32) -> DateTime<Local> {
    let step = i64::from(step_minutes.max(1)) * 60;
    let seconds = i64::from(minutes_from_midnight(t)) * 60 + i64::from(t.second());
    let rounded = (seconds + step / 2) / step * step;

    let base = t - Duration::nanoseconds(i64::from(t.nanosecond()));
    base + Duration::seconds(rounded - seconds)
}

/// The first day of the week containing `date`
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The date at `day_index` columns after the week start
pub fn date_in_week(week_start: NaiveDate, day_index: usize) -> NaiveDate {
    week_start + Duration::days(day_index as i64)
}

/// Local wall-clock instant on `date` at `hour`:`minute`
pub fn local_at(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    date.and_hms_opt(hour, minute, 0)?
        .and_local_timezone(Local)
        .single()
}
