//! File and platform services
//!
//! This module contains the split file codec, settings persistence and
//! the platform link opener.

pub mod links;
pub mod settings_store;
pub mod split_file;

// Re-export main types and functions
pub use links::open_link;
pub use settings_store::{SettingsStore, DEFAULT_CONFIG_FILE};
pub use split_file::{load_splits, save_splits, SavedSplits, SPLIT_FILE_EXTENSION};
