//! Notify use case
//!
//! Runs one hook invocation: config gates, quiet hours, cooldown, sound
//! resolution and playback. Any gate may end the run early as a suppression,
//! which is a normal outcome rather than an error.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::config::AppConfig;
use crate::domain::event::EventType;

use super::ports::{CooldownStore, PlaybackError, SoundPlayer, SoundResolver};

/// Errors from the notify use case
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no playable sound found")]
    NoPlayableSound,

    #[error("no audio player available: {0}")]
    NoPlayer(#[source] PlaybackError),

    #[error("sound playback failed: {0}")]
    Playback(#[source] PlaybackError),
}

/// Why a notification was not played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// `enabled: false` at the top level
    Disabled,
    /// The event's effective setting is disabled
    EventDisabled,
    /// Inside the quiet hours window
    QuietHours,
    /// Fired again before its cooldown elapsed
    Cooldown,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Disabled => "plugin disabled globally",
            Self::EventDisabled => "event disabled",
            Self::QuietHours => "in quiet hours",
            Self::Cooldown => "in cooldown period",
        };
        f.write_str(text)
    }
}

/// Result of a notify run
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyOutcome {
    Suppressed(SuppressReason),
    Played { path: PathBuf, volume: f64 },
}

/// Input parameters for the notify use case
#[derive(Debug, Clone)]
pub struct NotifyInput {
    pub event: EventType,
    /// Local wall-clock time used for the quiet hours check
    pub now: NaiveTime,
}

/// One-shot notification use case
pub struct NotifyUseCase<S, R, P>
where
    S: CooldownStore,
    R: SoundResolver,
    P: SoundPlayer,
{
    cooldowns: S,
    resolver: R,
    player: P,
}

impl<S, R, P> NotifyUseCase<S, R, P>
where
    S: CooldownStore,
    R: SoundResolver,
    P: SoundPlayer,
{
    /// Create a new use case instance
    pub fn new(cooldowns: S, resolver: R, player: P) -> Self {
        Self {
            cooldowns,
            resolver,
            player,
        }
    }

    /// Execute the notification pipeline against an already loaded config
    pub async fn execute(
        &self,
        config: &AppConfig,
        input: NotifyInput,
    ) -> Result<NotifyOutcome, NotifyError> {
        let event = input.event;

        if !config.enabled {
            debug!("plugin disabled globally, exiting");
            return Ok(NotifyOutcome::Suppressed(SuppressReason::Disabled));
        }

        let settings = config.event_config(event);
        debug!(
            active_profile = %config.active_profile,
            enabled = settings.enabled,
            sound = %settings.sound,
            volume = settings.volume,
            cooldown = settings.cooldown_secs,
            "event config"
        );

        if !settings.enabled {
            debug!(%event, "event is disabled, exiting");
            return Ok(NotifyOutcome::Suppressed(SuppressReason::EventDisabled));
        }

        if config.is_in_quiet_hours(input.now) {
            if let Some(ref quiet) = config.quiet_hours {
                debug!(start = %quiet.start, end = %quiet.end, "in quiet hours, suppressing notification");
            }
            return Ok(NotifyOutcome::Suppressed(SuppressReason::QuietHours));
        }

        match self
            .cooldowns
            .check_cooldown(event, settings.cooldown_secs)
            .await
        {
            Ok(true) => {
                debug!(cooldown = settings.cooldown_secs, "in cooldown period, suppressing notification");
                return Ok(NotifyOutcome::Suppressed(SuppressReason::Cooldown));
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "cooldown check error, proceeding with notification"),
        }

        debug!(platform = self.player.platform_name(), "all checks passed, resolving sound");

        let path = match self.resolver.resolve(&settings.sound, event) {
            Ok(path) => path,
            Err(e) => {
                debug!(error = %e, "sound resolution failed, trying fallbacks");
                self.resolver
                    .fallback(event)
                    .ok_or(NotifyError::NoPlayableSound)?
            }
        };
        debug!(path = %path.display(), "final sound path");

        let player = self
            .player
            .ensure_available()
            .await
            .map_err(NotifyError::NoPlayer)?;
        debug!(%player, "using audio player");

        self.player
            .play(&path, settings.volume)
            .await
            .map_err(NotifyError::Playback)?;

        debug!("sound playback initiated");
        Ok(NotifyOutcome::Played {
            path,
            volume: settings.volume,
        })
    }
}
