//! Prints the time label in place whenever it changes

use tokio::{io::AsyncWrite, sync::watch};
use tracing::debug;

use crate::shell::Console;

/// Redraw the label through `console` until the channel or the writer closes
pub async fn live_label_task<W>(mut display_rx: watch::Receiver<String>, console: Console<W>)
where
    W: AsyncWrite + Unpin,
{
    while display_rx.changed().await.is_ok() {
        let label = display_rx.borrow_and_update().clone();
        if console.draw_label(&label).await.is_err() {
            break;
        }
    }
    debug!("Live label task finished");
}
