//! Cooldown state port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::event::EventType;

/// Cooldown state errors
#[derive(Debug, Error)]
pub enum CooldownError {
    /// The event was not throttled, but its timestamp could not be stored
    #[error("failed to save state: {0}")]
    SaveFailed(String),

    #[error("failed to clear state: {0}")]
    ClearFailed(String),
}

/// Port for per-event cooldown tracking
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Check whether an event is still inside its cooldown window.
    ///
    /// Returns `Ok(true)` when the notification should be skipped. When the
    /// event is not throttled its last-fire time is updated to now.
    /// A cooldown of zero never throttles.
    async fn check_cooldown(&self, event: EventType, cooldown_secs: u64)
        -> Result<bool, CooldownError>;

    /// Forget all recorded fire times.
    async fn clear(&self) -> Result<(), CooldownError>;
}
