//! Shared terminal writer
//!
//! The shell and the live label both draw to one terminal. Both go through a
//! `Console` so a label frame never lands inside a rendered view, and the
//! label stays off the screen while a dialog is waiting for input.

use std::{io, sync::Arc};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

#[derive(Debug)]
struct ConsoleInner<W> {
    output: W,
    /// A label frame occupies the current line
    label_on_line: bool,
    paused: bool,
}

/// Cloneable handle to a single output writer
#[derive(Debug)]
pub struct Console<W> {
    inner: Arc<Mutex<ConsoleInner<W>>>,
}

impl<W> Clone for Console<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> Console<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(output: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ConsoleInner {
                output,
                label_on_line: false,
                paused: false,
            })),
        }
    }

    /// Print `text` on its own line, moving past a drawn label first
    pub async fn print(&self, text: &str) -> io::Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.label_on_line {
            inner.output.write_all(b"\n").await?;
            inner.label_on_line = false;
        }
        inner.output.write_all(text.as_bytes()).await?;
        inner.output.write_all(b"\n").await?;
        inner.output.flush().await
    }

    /// Redraw the time label in place. Skipped while paused.
    pub async fn draw_label(&self, label: &str) -> io::Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.paused {
            return Ok(());
        }
        let frame = format!("\r  {}  ", label);
        inner.output.write_all(frame.as_bytes()).await?;
        inner.label_on_line = true;
        inner.output.flush().await
    }

    /// Stop or resume label drawing; printed text is never held back
    pub async fn set_paused(&self, paused: bool) {
        self.inner.lock().await.paused = paused;
    }

    /// The writer back, once every other handle is gone
    pub fn into_inner(self) -> Option<W> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|inner| inner.into_inner().output)
    }
}
