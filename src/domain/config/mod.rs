//! Configuration domain module

mod app_config;
mod quiet_hours;

pub use app_config::{
    AppConfig, EventOverride, EventSettings, Profile, DEFAULT_PROFILE_NAME, DEFAULT_VOLUME,
};
pub use quiet_hours::{is_valid_time_format, parse_time_to_minutes, QuietHours};
