//! Background tasks module
//!
//! This module contains the tasks that run alongside the input loop.

pub mod display_refresh;
pub mod live_label;

// Re-export main functions
pub use display_refresh::{display_refresh_task, spawn_display_refresh, REFRESH_PERIOD};
pub use live_label::live_label_task;
