//! Hook event value object

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::InvalidEventError;

/// Lowercase letters and underscores only. Shared by event names,
/// bundled sound names and pack IDs.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+$").expect("identifier regex is valid"));

/// Check that a string is a lowercase identifier (`^[a-z_]+$`)
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// All recognized events, in display order
pub const ALL_EVENTS: &[EventType] = &[
    EventType::Stop,
    EventType::PermissionPrompt,
    EventType::IdlePrompt,
    EventType::Subagent,
];

/// Lifecycle events a notification can be fired for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum EventType {
    /// The agent finished responding
    #[default]
    Stop,
    /// The agent needs permission to continue
    PermissionPrompt,
    /// The agent is waiting for input
    IdlePrompt,
    /// A background agent completed
    Subagent,
}

impl EventType {
    /// Get the string identifier for this event
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::PermissionPrompt => "permission_prompt",
            Self::IdlePrompt => "idle_prompt",
            Self::Subagent => "subagent",
        }
    }

    /// Get the human-readable description for help output
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Stop => "Claude finished responding",
            Self::PermissionPrompt => "Claude needs your permission",
            Self::IdlePrompt => "Claude is waiting for input",
            Self::Subagent => "A background agent completed",
        }
    }

    /// Sound spec used when nothing else is configured
    pub fn default_sound(&self) -> String {
        format!("bundled:{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = InvalidEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_identifier(s) {
            return Err(InvalidEventError::Format {
                input: s.to_string(),
            });
        }

        match s {
            "stop" => Ok(Self::Stop),
            "permission_prompt" => Ok(Self::PermissionPrompt),
            "idle_prompt" => Ok(Self::IdlePrompt),
            "subagent" => Ok(Self::Subagent),
            _ => Err(InvalidEventError::Unknown {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
