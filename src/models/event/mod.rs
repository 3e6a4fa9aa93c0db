// Event module
// Calendar event model shared by the layout, gesture and sync layers

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised by [`Event::new`] and [`EventBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("event end time must be after start time")]
    InvalidTimeRange,
    #[error("event title is required")]
    MissingTitle,
    #[error("event start time is required")]
    MissingStart,
    #[error("event end time is required")]
    MissingEnd,
}

/// Event category tag carried on the wire as `type`
///
/// The set is closed: every consumer matches on it exhaustively, so adding
/// a variant fails to compile until each placement rule is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "event")]
    Standard,
    #[serde(rename = "birthday")]
    Birthday,
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Standard
    }
}

/// Identifiers tying a local event to its remote calendar copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLink {
    pub google_event_id: String,
    pub google_calendar_id: String,
}

/// Calendar event
///
/// Serializes to the remote payload shape: camelCase fields, the kind tag
/// as `type`, and the remote identifiers flattened alongside the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "startDate")]
    pub start: DateTime<Local>,
    #[serde(rename = "endDate")]
    pub end: DateTime<Local>,
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(flatten)]
    pub remote: Option<RemoteLink>,
    #[serde(skip)]
    pub created_at: Option<DateTime<Local>>,
    #[serde(skip)]
    pub updated_at: Option<DateTime<Local>>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// A fresh uuid-v4 id is minted. Titles must be non-empty and the end
    /// time must fall after the start time.
    ///
    /// # Examples
    /// ```
    /// use timegrid::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Sprint review", start, end).unwrap();
    /// assert!(!event.id.is_empty());
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, EventError> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if end <= start {
            return Err(EventError::InvalidTimeRange);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            start,
            end,
            all_day: false,
            color: None,
            kind: EventKind::Standard,
            remote: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Start building an event field by field
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Re-check the invariants `new` and `build` enforce
    ///
    /// Color strings are opaque and pass through unvalidated.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end <= self.start {
            return Err(EventError::InvalidTimeRange);
        }

        Ok(())
    }

    /// Span between start and end
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Whether the event occupies the time grid
    ///
    /// All-day events and birthdays live in the ribbon above the grid,
    /// never in the hour columns.
    pub fn is_timed(&self) -> bool {
        if self.all_day {
            return false;
        }
        match self.kind {
            EventKind::Standard => true,
            EventKind::Birthday => false,
        }
    }

    /// Whether drag and resize gestures may pick the event up
    pub fn is_interactive(&self) -> bool {
        self.is_timed()
    }

    /// Whether the event's calendar-date span covers `date`
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.start.date_naive() <= date && date <= self.end.date_naive()
    }

    /// Whether the event has a remote calendar copy
    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    color: Option<String>,
    kind: EventKind,
    remote: Option<RemoteLink>,
}

impl EventBuilder {
    /// Fresh builder with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit id (remote-origin events); minted when absent
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Title shown on the event block
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Free-text notes
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Start instant
    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    /// End instant; must land after the start for `build` to succeed
    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    /// Place the event in the all-day ribbon instead of the grid
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Display color, passed through untouched
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Category tag (standard or birthday)
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach remote calendar identifiers
    pub fn remote(mut self, remote: RemoteLink) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Build the event, enforcing the required fields and time order
    pub fn build(self) -> Result<Event, EventError> {
        let title = self.title.ok_or(EventError::MissingTitle)?;
        let start = self.start.ok_or(EventError::MissingStart)?;
        let end = self.end.ok_or(EventError::MissingEnd)?;

        let event = Event {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title,
            description: self.description,
            start,
            end,
            all_day: self.all_day,
            color: self.color,
            kind: self.kind,
            remote: self.remote,
            created_at: None,
            updated_at: None,
        };

        event.validate()?;
        Ok(event)
    }
}
