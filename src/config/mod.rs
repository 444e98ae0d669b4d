//! Command-line parsing and validation helpers.

mod validation;

use clap::Parser;

/// Default preview height, a classic 80x25 terminal.
pub const DEFAULT_PREVIEW_ROWS: u16 = 25;
/// Default preview width.
pub const DEFAULT_PREVIEW_COLS: u16 = 80;
/// Largest preview dimension accepted on the command line.
pub const MAX_PREVIEW_DIMENSION: u16 = 500;

/// CLI options for the stopwatch. Only diagnostics and logging are configurable.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "stopwatch",
    about = "Stopwatch: a terminal stopwatch with laps",
    author,
    version
)]
pub struct AppConfig {
    /// Enable file logging (debug)
    #[arg(long = "logs", env = "STOPWATCH_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "STOPWATCH_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Print environment and layout diagnostics and exit
    #[arg(long = "doctor", default_value_t = false)]
    pub doctor: bool,

    /// Render one frame to stdout at --rows x --cols and exit
    #[arg(long = "preview", default_value_t = false)]
    pub preview: bool,

    /// Preview height in terminal rows
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: u16,

    /// Preview width in terminal columns
    #[arg(long, default_value_t = DEFAULT_PREVIEW_COLS)]
    pub cols: u16,
}

impl AppConfig {
    /// Whether file logging is on after applying `--no-logs`.
    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
