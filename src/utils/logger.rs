//! Logging initialization.
//!
//! The TUI owns stdout, so logs go to a file under `logs/` next to the
//! executable, one file per run. The level comes from `RUST_LOG` and
//! defaults to `info`:
//!
//! - `RUST_LOG=debug` also logs shell dispatch and deferred deliveries
//! - `RUST_LOG=warn` keeps only relay failures and bad config

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// `termfolio.2024-12-06-14-30-25.log`
pub fn log_file_name(at: DateTime<Local>) -> String {
    format!("termfolio.{}.log", at.format("%Y-%m-%d-%H-%M-%S"))
}

fn create_log_file(dir: &Path) -> std::io::Result<(fs::File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(Local::now()));
    let file = fs::File::create(&path)?;
    Ok((file, path))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the writer. Returns `None` (and logs nothing) when the log file
/// cannot be created.
pub fn init_logging() -> Option<WorkerGuard> {
    let (log_file, log_path) = match create_log_file(&log_dir()) {
        Ok(created) => created,
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized - writing to {}", log_path.display());
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let at = Local.with_ymd_and_hms(2024, 12, 6, 14, 30, 25).unwrap();
        assert_eq!(log_file_name(at), "termfolio.2024-12-06-14-30-25.log");
    }
}
