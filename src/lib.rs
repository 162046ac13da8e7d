//! BasicSplit - a stopwatch and speedrun split timer
//!
//! This library provides the timer engine, split file persistence, run
//! comparison, the settings store and a terminal shell driving them.

pub mod config;
pub mod error;
pub mod state;
pub mod services;
pub mod shell;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{SplitError, SplitResult};
pub use state::AppState;
pub use shell::Shell;
pub use utils::{format_time, signals::shutdown_signal};
