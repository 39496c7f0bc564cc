//! Config infrastructure adapters

mod json;

pub use json::{JsonConfigStore, CONFIG_FILE_NAME};
