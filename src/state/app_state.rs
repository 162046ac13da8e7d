//! Main application state management

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    ComparisonBaseline, Pace, SettingKey, Settings, SplitList, TimerAction, TimerEngine,
    UnmatchedPolicy, WindowChrome,
};
use crate::{
    error::{SplitError, SplitResult},
    services::{load_splits, save_splits, SettingsStore},
    utils::format_time,
};

/// One rendered row of the split list
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRow {
    /// 1-based position
    pub number: usize,
    pub seconds: f64,
    pub pace: Option<Pace>,
}

/// Result of loading a baseline for comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOutcome {
    /// Whole-list equality with the current run
    pub matches: bool,
    pub baseline_len: usize,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Owner of all application state. Every user action goes through here.
#[derive(Debug)]
pub struct AppState {
    engine: Mutex<TimerEngine>,
    baseline: Mutex<Option<ComparisonBaseline>>,
    settings: Mutex<SettingsStore>,
    chrome: Mutex<WindowChrome>,
    pub unmatched_policy: UnmatchedPolicy,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel carrying the current time label
    display_tx: watch::Sender<String>,
    /// Keep the receiver alive to prevent channel closure
    _display_rx: watch::Receiver<String>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &'static str) -> SplitResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| SplitError::StatePoisoned(what))
}

impl AppState {
    /// Create the application state and apply the loaded settings to the window
    pub fn new(
        engine: TimerEngine,
        settings: SettingsStore,
        unmatched_policy: UnmatchedPolicy,
    ) -> SplitResult<Self> {
        let chrome = WindowChrome::from_settings(settings.settings())?;
        let (display_tx, display_rx) = watch::channel(format_time(engine.elapsed()));

        Ok(Self {
            engine: Mutex::new(engine),
            baseline: Mutex::new(None),
            settings: Mutex::new(settings),
            chrome: Mutex::new(chrome),
            unmatched_policy,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            display_tx,
            _display_rx: display_rx,
        })
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, label: String) {
        if let Err(e) = self.display_tx.send(label) {
            warn!("Failed to publish time label: {}", e);
        }
    }

    /// Receiver for time label updates
    pub fn subscribe_display(&self) -> watch::Receiver<String> {
        self.display_tx.subscribe()
    }

    /// Run a hotkey-bound action. Returns the run id when a new run started.
    pub fn perform(&self, action: TimerAction) -> SplitResult<Option<u64>> {
        match action {
            TimerAction::Start => return self.start(),
            TimerAction::Stop => {
                self.stop()?;
            }
            TimerAction::Reset => self.reset()?,
            TimerAction::Split => {
                self.split()?;
            }
        }
        Ok(None)
    }

    /// Start the timer. Returns the new run id, or None if it was already running.
    pub fn start(&self) -> SplitResult<Option<u64>> {
        let mut engine = lock(&self.engine, "timer")?;
        if !engine.start() {
            debug!("Start ignored, timer already running");
            return Ok(None);
        }
        let run_id = engine.run_id();
        let label = format_time(engine.elapsed());
        drop(engine);

        info!("Timer started (run {})", run_id);
        self.record_action("start");
        self.publish(label);
        Ok(Some(run_id))
    }

    /// Stop the timer. Returns false if it was not running.
    pub fn stop(&self) -> SplitResult<bool> {
        let mut engine = lock(&self.engine, "timer")?;
        if !engine.stop() {
            debug!("Stop ignored, timer not running");
            return Ok(false);
        }
        let elapsed = engine.elapsed();
        drop(engine);

        info!("Timer stopped at {}", format_time(elapsed));
        self.record_action("stop");
        self.publish(format_time(elapsed));
        Ok(true)
    }

    /// Stop if running, start otherwise
    pub fn toggle(&self) -> SplitResult<Option<u64>> {
        if self.is_running()? {
            self.stop()?;
            Ok(None)
        } else {
            self.start()
        }
    }

    /// Stop, clear the splits and drop the comparison baseline
    pub fn reset(&self) -> SplitResult<()> {
        lock(&self.engine, "timer")?.reset();
        *lock(&self.baseline, "baseline")? = None;

        info!("Timer reset");
        self.record_action("reset");
        self.publish(format_time(0.0));
        Ok(())
    }

    /// Record a split. Returns None when the timer is stopped.
    pub fn split(&self) -> SplitResult<Option<f64>> {
        let mut engine = lock(&self.engine, "timer")?;
        let split = engine.split();
        let count = engine.splits().len();
        drop(engine);

        match split {
            Some(seconds) => {
                info!("Split {} at {}", count, format_time(seconds));
                self.record_action("split");
            }
            None => debug!("Split ignored, timer not running"),
        }
        Ok(split)
    }

    /// Whether the stopwatch is running
    pub fn is_running(&self) -> SplitResult<bool> {
        Ok(lock(&self.engine, "timer")?.is_running())
    }

    /// Elapsed seconds: live while running, frozen otherwise
    pub fn elapsed(&self) -> SplitResult<f64> {
        Ok(lock(&self.engine, "timer")?.elapsed())
    }

    /// `elapsed()` formatted for the time label
    pub fn elapsed_label(&self) -> SplitResult<String> {
        Ok(format_time(self.elapsed()?))
    }

    /// Refresh the display for `run_id`.
    ///
    /// Returns false once that run is no longer the running one, which ends
    /// the refresh chain.
    pub fn refresh(&self, run_id: u64) -> SplitResult<bool> {
        let engine = lock(&self.engine, "timer")?;
        if !engine.is_running() || engine.run_id() != run_id {
            return Ok(false);
        }
        let label = format_time(engine.elapsed());
        drop(engine);

        self.publish(label);
        Ok(true)
    }

    /// Snapshot of the current run's splits
    pub fn splits(&self) -> SplitResult<SplitList> {
        Ok(lock(&self.engine, "timer")?.splits().clone())
    }

    /// Current splits annotated against the baseline, if one is loaded
    pub fn split_rows(&self) -> SplitResult<Vec<SplitRow>> {
        let splits = self.splits()?;
        let paces = match lock(&self.baseline, "baseline")?.as_ref() {
            Some(baseline) => baseline.annotate(&splits, self.unmatched_policy),
            None => vec![None; splits.len()],
        };

        Ok(splits
            .iter()
            .zip(paces)
            .enumerate()
            .map(|(i, (seconds, pace))| SplitRow {
                number: i + 1,
                seconds,
                pace,
            })
            .collect())
    }

    /// Baseline loaded by the last compare, if any
    pub fn baseline(&self) -> SplitResult<Option<ComparisonBaseline>> {
        Ok(lock(&self.baseline, "baseline")?.clone())
    }

    /// Write the current splits to `path`. Returns how many were written.
    pub fn save_splits(&self, path: &Path) -> SplitResult<usize> {
        let splits = self.splits()?;
        save_splits(path, &splits)?;
        self.record_action("save");
        Ok(splits.len())
    }

    /// Load `path` as the comparison baseline, replacing any previous one
    pub fn compare(&self, path: &Path) -> SplitResult<CompareOutcome> {
        let saved = load_splits(path)?;
        let current = self.splits()?;
        let baseline = ComparisonBaseline::new(saved.splits, saved.saved_at);
        let outcome = CompareOutcome {
            matches: baseline.matches(&current),
            baseline_len: baseline.splits().len(),
            saved_at: baseline.saved_at(),
        };
        *lock(&self.baseline, "baseline")? = Some(baseline);

        info!(
            "Loaded baseline of {} splits from {} (match: {})",
            outcome.baseline_len,
            path.display(),
            outcome.matches
        );
        self.record_action("compare");
        Ok(outcome)
    }

    /// Snapshot of the in-memory settings
    pub fn settings(&self) -> SplitResult<Settings> {
        Ok(lock(&self.settings, "settings")?.settings().clone())
    }

    /// Update one setting in memory without saving
    pub fn set_setting(&self, key: SettingKey, value: impl Into<String>) -> SplitResult<()> {
        lock(&self.settings, "settings")?.set(key, value);
        Ok(())
    }

    /// Action bound to the pressed key, if any
    pub fn action_for_key(&self, key: &str) -> SplitResult<Option<TimerAction>> {
        Ok(lock(&self.settings, "settings")?.settings().action_for_key(key))
    }

    /// Current window attributes
    pub fn chrome(&self) -> SplitResult<WindowChrome> {
        Ok(lock(&self.chrome, "window")?.clone())
    }

    /// Set the live always-on-top attribute without touching settings
    pub fn set_always_on_top(&self, on: bool) -> SplitResult<()> {
        lock(&self.chrome, "window")?.always_on_top = on;
        debug!("Window always-on-top set to {}", on);
        Ok(())
    }

    /// Push the in-memory settings onto the window
    pub fn apply_settings(&self) -> SplitResult<WindowChrome> {
        let chrome = WindowChrome::from_settings(lock(&self.settings, "settings")?.settings())?;
        *lock(&self.chrome, "window")? = chrome.clone();
        info!(
            "Applied settings: always_on_top={}, background={:?}",
            chrome.always_on_top, chrome.background_color
        );
        Ok(chrome)
    }

    /// Commit settings form fields, apply them and write the config file.
    ///
    /// AlwaysOnTop is taken from the live window attribute, not from `fields`.
    pub fn save_settings(&self, fields: &[(SettingKey, String)]) -> SplitResult<()> {
        let always_on_top = self.chrome()?.always_on_top;
        {
            let mut store = lock(&self.settings, "settings")?;
            for (key, value) in fields {
                if *key != SettingKey::AlwaysOnTop {
                    store.set(*key, value.clone());
                }
            }
            store.set(SettingKey::AlwaysOnTop, if always_on_top { "yes" } else { "no" });
        }

        self.apply_settings()?;
        lock(&self.settings, "settings")?.save()?;
        self.record_action("save-settings");
        Ok(())
    }

    /// Name and time of the last state-changing action, shown in the main view
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
