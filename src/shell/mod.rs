//! Terminal presentation shell
//!
//! Stands in for a windowing toolkit: reads one line per key press or
//! command, dispatches it to `AppState` and prints the resulting view.

pub mod commands;
pub mod console;
pub mod handlers;
pub mod responses;
pub mod settings_form;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tracing::info;

pub use console::Console;
pub use handlers::{Mode, Reply, Shell};
pub use settings_form::SettingsForm;

impl Shell {
    /// Read input until end of stream or `close`
    ///
    /// The live label is paused whenever a dialog is waiting for input.
    pub async fn run<R, W>(mut self, input: R, console: Console<W>) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let greeting = match self.main_view() {
            Ok(view) => format!("{}\nType 'help' for commands.", view),
            Err(e) => format!("Error: {}", e),
        };
        console.print(&greeting).await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line).await {
                Reply::Render(text) => {
                    console.set_paused(self.mode() != &Mode::Main).await;
                    console.print(&text).await?;
                }
                Reply::Close => break,
            }
        }

        info!("Input closed, leaving shell");
        Ok(())
    }
}
