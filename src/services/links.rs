//! Opening external links with the platform's default handler

use tokio::process::Command;
use tracing::info;

use crate::error::{SplitError, SplitResult};

/// Program and leading arguments that hand a URL to the desktop
fn opener() -> (&'static str, Vec<&'static str>) {
    if cfg!(target_os = "macos") {
        ("open", Vec::new())
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", ""])
    } else {
        ("xdg-open", Vec::new())
    }
}

/// Open `url` in the default browser
pub async fn open_link(url: &str) -> SplitResult<()> {
    let (program, args) = opener();
    info!("Opening {} with {}", url, program);

    let output = Command::new(program)
        .args(args)
        .arg(url)
        .output()
        .await
        .map_err(|e| SplitError::OpenLink(format!("failed to execute {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SplitError::OpenLink(format!("{} failed: {}", program, stderr.trim())));
    }

    Ok(())
}
