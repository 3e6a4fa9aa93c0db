// Test fixtures - reusable test data
// Provides consistent events and logging setup across the test suites

#![allow(dead_code)]

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the capture-friendly test logger once per test binary
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Sample dates for testing
pub mod dates {
    use chrono::{DateTime, Local, NaiveDate, TimeZone};

    /// Monday, March 10, 2025 - the base test week
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Wednesday of the base test week
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    /// Wall-clock instant on the base Monday
    pub fn monday_at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 10, hour, minute, 0)
            .unwrap()
    }

    /// Wall-clock instant `day_offset` days into the base week
    pub fn week_at(day_offset: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 10 + day_offset, hour, minute, 0)
            .unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::dates;
    use timegrid::models::event::{Event, EventKind, RemoteLink};

    /// Timed event on the base Monday
    pub fn timed(id: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::builder()
            .id(id)
            .title(id)
            .start(dates::monday_at(start.0, start.1))
            .end(dates::monday_at(end.0, end.1))
            .build()
            .unwrap()
    }

    /// Morning standup, 09:00-10:00
    pub fn standup() -> Event {
        Event::builder()
            .id("standup")
            .title("Team Standup")
            .start(dates::monday_at(9, 0))
            .end(dates::monday_at(10, 0))
            .build()
            .unwrap()
    }

    /// Design review overlapping the standup, 09:30-10:30
    pub fn review() -> Event {
        Event::builder()
            .id("review")
            .title("Design Review")
            .start(dates::monday_at(9, 30))
            .end(dates::monday_at(10, 30))
            .build()
            .unwrap()
    }

    /// Solo late-morning block, 11:00-12:00
    pub fn lunch() -> Event {
        Event::builder()
            .id("lunch")
            .title("Team Lunch")
            .start(dates::monday_at(11, 0))
            .end(dates::monday_at(12, 0))
            .build()
            .unwrap()
    }

    /// All-day banner on the base Monday; ribbon only
    pub fn holiday() -> Event {
        Event::builder()
            .id("holiday")
            .title("Public Holiday")
            .start(dates::monday_at(0, 0))
            .end(dates::monday_at(23, 59))
            .all_day(true)
            .build()
            .unwrap()
    }

    /// Birthday entry; ribbon only
    pub fn birthday() -> Event {
        Event::builder()
            .id("bday")
            .title("Ada's Birthday")
            .start(dates::monday_at(0, 0))
            .end(dates::monday_at(23, 59))
            .kind(EventKind::Birthday)
            .build()
            .unwrap()
    }

    /// Timed event already linked to its remote calendar copy
    pub fn synced(id: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::builder()
            .id(id)
            .title(id)
            .start(dates::monday_at(start.0, start.1))
            .end(dates::monday_at(end.0, end.1))
            .remote(RemoteLink {
                google_event_id: format!("g-{}", id),
                google_calendar_id: "primary".to_string(),
            })
            .build()
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(dates::monday().weekday().num_days_from_monday(), 0);
        assert_eq!(dates::wednesday().weekday().num_days_from_monday(), 2);
        assert_eq!(dates::week_at(2, 14, 30).date_naive(), dates::wednesday());
    }

    #[test]
    fn test_fixture_events_are_valid() {
        assert!(events::standup().is_timed());
        assert!(events::review().validate().is_ok());
        assert!(!events::holiday().is_timed());
        assert!(!events::birthday().is_interactive());
        assert!(events::synced("s1", (9, 0), (10, 0)).is_remote());
    }
}
