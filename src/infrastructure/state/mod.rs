//! Persistent state adapters

mod cooldown_file;

pub use cooldown_file::{CooldownState, FileCooldownStore, STATE_FILE_NAME};
