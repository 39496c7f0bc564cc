//! Notifier configuration value objects

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::quiet_hours::{is_valid_time_format, QuietHours};
use crate::domain::error::ConfigError;
use crate::domain::event::{EventType, ALL_EVENTS};

/// Profile name that means "no profile overrides"
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Volume used when no layer sets one
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Per-event override.
/// All fields are optional: `None` means "inherit from the layer below".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<i64>,
}

impl EventOverride {
    /// Merge this override with another, where other takes precedence.
    /// Only set values from other will override this. An empty sound
    /// string counts as unset.
    pub fn merge(self, other: &Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            sound: other
                .sound
                .clone()
                .filter(|s| !s.is_empty())
                .or(self.sound),
            volume: other.volume.or(self.volume),
            cooldown: other.cooldown.or(self.cooldown),
        }
    }

    fn validate(&self, context: &str) -> Result<(), ConfigError> {
        if let Some(volume) = self.volume {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::ValidationError(format!(
                    "{context}: volume must be 0.0-1.0, got {volume}"
                )));
            }
        }
        if let Some(cooldown) = self.cooldown {
            if cooldown < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{context}: cooldown cannot be negative"
                )));
            }
        }
        Ok(())
    }
}

/// Named bundle of per-event overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub events: BTreeMap<String, EventOverride>,
}

/// Fully resolved setting for one event
#[derive(Debug, Clone, PartialEq)]
pub struct EventSettings {
    pub enabled: bool,
    pub sound: String,
    pub volume: f64,
    pub cooldown_secs: u64,
}

/// Notifier configuration as stored on disk.
///
/// Fields missing from the file keep their default values. Event entries in
/// the file replace the default entry for that event only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub enabled: bool,
    pub debug: bool,
    pub active_profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours: Option<QuietHours>,
    #[serde(
        deserialize_with = "deserialize_events",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub events: BTreeMap<String, EventOverride>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            active_profile: DEFAULT_PROFILE_NAME.to_string(),
            quiet_hours: None,
            events: default_events(),
            profiles: BTreeMap::new(),
        }
    }
}

/// Compiled-in per-event entries written to a fresh config file
fn default_events() -> BTreeMap<String, EventOverride> {
    ALL_EVENTS
        .iter()
        .map(|event| {
            let volume = match event {
                EventType::PermissionPrompt => 0.7,
                _ => DEFAULT_VOLUME,
            };
            (
                event.as_str().to_string(),
                EventOverride {
                    enabled: Some(true),
                    sound: Some(event.default_sound()),
                    volume: Some(volume),
                    cooldown: Some(0),
                },
            )
        })
        .collect()
}

/// User entries replace the compiled-in entry for the same event.
/// An explicit `null` clears every entry.
fn deserialize_events<'de, D>(deserializer: D) -> Result<BTreeMap<String, EventOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    let user: Option<BTreeMap<String, EventOverride>> = Option::deserialize(deserializer)?;
    Ok(user.map_or_else(BTreeMap::new, |user| {
        let mut events = default_events();
        events.extend(user);
        events
    }))
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self::default()
    }

    /// The active profile, unless it is unset or the default sentinel
    pub fn active_profile(&self) -> Option<&str> {
        match self.active_profile.as_str() {
            "" | DEFAULT_PROFILE_NAME => None,
            name => Some(name),
        }
    }

    /// Check event names, numeric ranges, quiet hours format and the active profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref quiet) = self.quiet_hours {
            if !quiet.start.is_empty() && !is_valid_time_format(&quiet.start) {
                return Err(ConfigError::ValidationError(format!(
                    "invalid quietHours.start format: {} (expected HH:MM)",
                    quiet.start
                )));
            }
            if !quiet.end.is_empty() && !is_valid_time_format(&quiet.end) {
                return Err(ConfigError::ValidationError(format!(
                    "invalid quietHours.end format: {} (expected HH:MM)",
                    quiet.end
                )));
            }
        }

        if let Some(name) = self.active_profile() {
            if !self.profiles.contains_key(name) {
                return Err(ConfigError::ValidationError(format!(
                    "activeProfile \"{name}\" not found in profiles"
                )));
            }
        }

        for (name, event) in &self.events {
            if name.parse::<EventType>().is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "unknown event type: {name}"
                )));
            }
            event.validate(&format!("event {name}"))?;
        }

        for (profile_name, profile) in &self.profiles {
            for (name, event) in &profile.events {
                if name.parse::<EventType>().is_err() {
                    return Err(ConfigError::ValidationError(format!(
                        "profile {profile_name}: unknown event type: {name}"
                    )));
                }
                event.validate(&format!("profile {profile_name}, event {name}"))?;
            }
        }

        Ok(())
    }

    /// Effective setting for an event: built-in defaults, then the base
    /// event entry, then the active profile's entry.
    pub fn event_config(&self, event: EventType) -> EventSettings {
        let defaults = EventOverride {
            enabled: Some(true),
            sound: Some(event.default_sound()),
            volume: Some(DEFAULT_VOLUME),
            cooldown: Some(0),
        };

        let mut merged = defaults;
        if let Some(base) = self.events.get(event.as_str()) {
            merged = merged.merge(base);
        }

        if let Some(profile_event) = self
            .active_profile()
            .and_then(|name| self.profiles.get(name))
            .and_then(|profile| profile.events.get(event.as_str()))
        {
            merged = merged.merge(profile_event);
        }

        EventSettings {
            enabled: merged.enabled.unwrap_or(true),
            sound: merged.sound.unwrap_or_else(|| event.default_sound()),
            volume: merged.volume.unwrap_or(DEFAULT_VOLUME),
            cooldown_secs: merged.cooldown.unwrap_or(0).max(0) as u64,
        }
    }

    /// Check whether `now` falls inside the configured quiet hours
    pub fn is_in_quiet_hours(&self, now: NaiveTime) -> bool {
        self.quiet_hours
            .as_ref()
            .is_some_and(|quiet| quiet.contains(now))
    }

    /// Human-readable quiet hours status
    pub fn quiet_hours_status(&self, now: NaiveTime) -> &'static str {
        match self.quiet_hours {
            Some(ref quiet) if quiet.is_configured() => {
                if quiet.contains(now) {
                    "active (currently in quiet period)"
                } else {
                    "configured but not active"
                }
            }
            _ => "not configured",
        }
    }

    /// Parse a JSON document, keeping defaults for anything it omits
    pub fn from_json(content: &str, source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}
