//! Display refresh background task

use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, error};

use crate::state::AppState;

/// Time between display refreshes while the timer runs
pub const REFRESH_PERIOD: Duration = Duration::from_millis(100);

/// Refresh the time label every `period` for as long as run `run_id` is running.
///
/// Each wake checks whether the run is still live before re-arming, so
/// stopping, resetting or restarting the timer ends this chain on its next wake.
pub async fn display_refresh_task(state: Arc<AppState>, run_id: u64, period: Duration) {
    debug!("Starting display refresh for run {}", run_id);

    loop {
        match state.refresh(run_id) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Run {} is over, display refresh stopped", run_id);
                break;
            }
            Err(e) => {
                error!("Display refresh failed: {}", e);
                break;
            }
        }
        sleep(period).await;
    }
}

/// Spawn the refresh chain for a run that just started
pub fn spawn_display_refresh(state: &Arc<AppState>, run_id: u64) -> JoinHandle<()> {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        display_refresh_task(state, run_id, REFRESH_PERIOD).await;
    })
}
