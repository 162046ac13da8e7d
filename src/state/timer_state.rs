//! Stopwatch engine and the clock it reads time from

use std::{
    fmt,
    time::{Duration, Instant},
};

use super::SplitList;

/// Source of monotonic time for the stopwatch.
///
/// `now()` returns the time since an arbitrary fixed origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Clock backed by `Instant`, origin at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Running flag, start timestamp and the elapsed value frozen at the last stop
#[derive(Debug, Clone, Default, PartialEq)]
struct TimerState {
    running: bool,
    start_epoch: Option<Duration>,
    last_elapsed: f64,
    /// Bumped on every transition into running
    run_id: u64,
}

/// Stopwatch with an ordered list of split times
pub struct TimerEngine {
    clock: Box<dyn Clock>,
    state: TimerState,
    splits: SplitList,
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("splits", &self.splits)
            .finish()
    }
}

impl TimerEngine {
    /// Create a stopped engine reading time from `clock`
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            state: TimerState::default(),
            splits: SplitList::new(),
        }
    }

    /// Engine on the system monotonic clock
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock::new())
    }

    /// Whether the stopwatch is counting
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Generation of the current or most recent run
    pub fn run_id(&self) -> u64 {
        self.state.run_id
    }

    /// Splits of the current run, oldest first
    pub fn splits(&self) -> &SplitList {
        &self.splits
    }

    /// Start timing from now. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        self.state.start_epoch = Some(self.clock.now());
        self.state.run_id += 1;
        true
    }

    /// Stop and freeze the elapsed value. Returns false if not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.last_elapsed = self.since_start();
        self.state.running = false;
        true
    }

    /// Stop, drop all splits and zero the displayed time.
    ///
    /// The start epoch stays as it is; nothing reads it until the next start.
    pub fn reset(&mut self) {
        self.state.running = false;
        self.state.last_elapsed = 0.0;
        self.splits.clear();
    }

    /// Record the current elapsed time. Returns the new split, or None when stopped.
    pub fn split(&mut self) -> Option<f64> {
        if !self.state.running {
            return None;
        }
        let elapsed = self.since_start();
        self.splits.push(elapsed);
        Some(elapsed)
    }

    /// Seconds since start while running, the frozen value otherwise
    pub fn elapsed(&self) -> f64 {
        if self.state.running {
            self.since_start()
        } else {
            self.state.last_elapsed
        }
    }

    fn since_start(&self) -> f64 {
        match self.state.start_epoch {
            Some(start) => self.clock.now().saturating_sub(start).as_secs_f64(),
            None => 0.0,
        }
    }
}

#[cfg(test)]
pub use manual::ManualClock;
