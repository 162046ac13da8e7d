//! State management module
//!
//! This module contains the stopwatch engine, split lists, comparison
//! baselines, settings and the application state that owns them.

pub mod app_state;
pub mod comparison;
pub mod settings;
pub mod split_list;
pub mod timer_state;
pub mod window;

// Re-export main types
pub use app_state::{AppState, CompareOutcome, SplitRow};
pub use comparison::{ComparisonBaseline, Pace, UnmatchedPolicy};
pub use settings::{SettingKey, Settings, TimerAction};
pub use split_list::SplitList;
pub use timer_state::{Clock, SystemClock, TimerEngine};
#[cfg(test)]
pub use timer_state::ManualClock;
pub use window::WindowChrome;
