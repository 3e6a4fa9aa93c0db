// Remote calendar client
// Async seam to the external calendar copy

use async_trait::async_trait;
use thiserror::Error;

use crate::models::event::Event;

/// Budget for one remote call
pub const REMOTE_TIMEOUT_SECS: u64 = 10;

/// Failures reported by a remote calendar provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Event not found on the remote calendar")]
    NotFound,
    #[error("Remote calendar rejected the credentials")]
    Unauthorized,
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Provider request timed out after {0}s")]
    Timeout(u64),
}

/// Client for the remote calendar copy of local events
///
/// Implementations bring their own transport; the engine needs only
/// create-or-update and delete. Upsert returns the remote-normalized
/// event so locally minted events come back carrying their remote ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteCalendarClient: Send + Sync {
    async fn upsert_event(&self, event: &Event, account_id: &str) -> Result<Event, RemoteError>;

    async fn delete_event(&self, event_id: &str, calendar_id: &str) -> Result<(), RemoteError>;
}
