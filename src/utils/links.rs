//! Hand URLs to the desktop's opener.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, warn};

/// Program and arguments that open `url` on this platform.
pub fn opener_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        // the empty string is the window title `start` expects first
        ("cmd", vec!["/C".into(), "start".into(), String::new(), url.to_string()])
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Launch the opener without waiting for it. Must run inside a tokio runtime.
pub fn open(url: &str) -> Result<()> {
    let (program, args) = opener_command(url);
    let mut child = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch {} for {}", program, url))?;

    let url = url.to_string();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => debug!("Opened {}", url),
            Ok(status) => warn!("Opener for {} exited with {}", url, status),
            Err(e) => warn!("Opener for {} failed: {}", url, e),
        }
    });
    Ok(())
}
