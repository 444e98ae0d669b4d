use crate::config::AppConfig;
use std::{
    env, fs, panic,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, OnceLock,
    },
};
use tracing_subscriber::fmt::time::UtcTime;

const LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
static LOG_ENABLED: AtomicBool = AtomicBool::new(false);
static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Path to the temp log file. Stdout belongs to the TUI, so logs never go there.
pub fn log_file_path() -> PathBuf {
    env::var("STOPWATCH_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("stopwatch_tui.log"))
}

/// Drop the log file once it grows past `max_bytes` so it never grows unbounded across runs.
fn trim_oversized(path: &Path, max_bytes: u64) {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size > max_bytes {
        let _ = fs::remove_file(path);
    }
}

/// Install the JSON file subscriber when logging is enabled.
pub fn init_logging(config: &AppConfig) {
    let enabled = config.logging_enabled();
    LOG_ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        return;
    }

    let _ = TRACING_INIT.get_or_init(|| {
        let path = log_file_path();
        trim_oversized(&path, LOG_MAX_BYTES);
        let file = match fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(Mutex::new(file))
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[must_use]
pub fn logging_enabled() -> bool {
    LOG_ENABLED.load(Ordering::Relaxed)
}

/// Record where a panic happened. The payload is omitted.
pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    if !logging_enabled() {
        return;
    }
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown".to_string());
    tracing::error!(
        %location,
        version = env!("CARGO_PKG_VERSION"),
        "panic"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn disabled_config_leaves_logging_off() {
        let config = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
        init_logging(&config);
        assert!(!logging_enabled());
    }

    #[test]
    fn oversized_log_is_removed() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = env::temp_dir().join(format!("stopwatch_log_trim_{nanos}.log"));
        fs::write(&path, vec![b'x'; 64]).expect("seed log");

        trim_oversized(&path, 128);
        assert!(path.exists());

        trim_oversized(&path, 16);
        assert!(!path.exists());
    }
}
