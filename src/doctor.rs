use crate::{
    config::AppConfig,
    history::HistoryRing,
    layout, log_file_path,
    persist::{FileHistorySink, HISTORY_FILE_NAME},
};
use crossterm::terminal::size as terminal_size;
use std::{env, fmt::Display};

pub struct DoctorReport {
    lines: Vec<String>,
}

impl DoctorReport {
    pub fn new(title: &str) -> Self {
        Self {
            lines: vec![title.to_string()],
        }
    }

    pub fn section(&mut self, title: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("{title}:"));
    }

    pub fn push_kv(&mut self, key: &str, value: impl Display) {
        self.lines.push(format!("  {key}: {value}"));
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn base_doctor_report(config: &AppConfig) -> DoctorReport {
    let mut report = DoctorReport::new("Stopwatch Doctor");
    report.push_kv("version", env!("CARGO_PKG_VERSION"));
    report.push_kv(
        "os",
        format!("{}/{}", env::consts::OS, env::consts::ARCH),
    );

    report.section("Terminal");
    match terminal_size() {
        Ok((cols, rows)) => {
            report.push_kv("size", format!("{cols}x{rows}"));
            push_layout(&mut report, rows, cols);
        }
        Err(err) => report.push_kv("size", format!("error: {err}")),
    }
    report.push_kv(
        "term",
        env::var("TERM").unwrap_or_else(|_| "unset".to_string()),
    );

    report.section("Config");
    match config.validate() {
        Ok(()) => report.push_kv("validation", "ok"),
        Err(err) => report.push_kv("validation", format!("error: {err}")),
    }
    report.push_kv(
        "logs",
        if config.logging_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    );
    report.push_kv("log_file", log_file_path().display());
    let sink = FileHistorySink::default();
    let history_file = env::current_dir()
        .map(|dir| dir.join(sink.path()).display().to_string())
        .unwrap_or_else(|_| HISTORY_FILE_NAME.to_string());
    report.push_kv("history_file", history_file);
    report.push_kv("history_capacity", HistoryRing::new().capacity());

    report.section("Keys");
    for line in KEY_BINDINGS {
        report.push_line(format!("  {line}"));
    }

    report
}

const KEY_BINDINGS: [&str; 5] = [
    "q / Ctrl+C  quit",
    "<SPACE>     pause or resume (records a lap when pausing)",
    "r           reset (records a lap when running)",
    "l           record a lap",
    "s           save history to history.dat",
];

fn push_layout(report: &mut DoctorReport, rows: u16, cols: u16) {
    let mode = layout::classify(rows, cols);
    report.push_kv(
        "layout",
        format!("height={:?} width={:?}", mode.height, mode.width),
    );
    report.push_kv("bottom_margin", layout::bottom_margin(mode.height));
    report.push_kv(
        "clock",
        if mode.uses_big_clock() {
            "big"
        } else {
            "compact"
        },
    );
    report.push_kv(
        "commands_panel",
        if mode.shows_commands() {
            "shown"
        } else {
            "hidden"
        },
    );
}
