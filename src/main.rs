use anyhow::{Context, Result};
use clap::Parser;
use std::{io, time::Instant};
use stopwatch::{
    config::AppConfig,
    doctor::base_doctor_report,
    event_loop::{render_preview, run_event_loop, EventLoopDeps, EventLoopState},
    init_logging, log_file_path,
    persist::FileHistorySink,
    surface::CrosstermSurface,
    terminal_restore::TerminalRestoreGuard,
};

#[cfg(not(test))]
fn main() -> Result<()> {
    run_with_args(std::env::args_os())
}

#[cfg_attr(test, allow(dead_code))]
fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let config = AppConfig::parse_from(args);
    if config.doctor {
        let report = base_doctor_report(&config);
        println!("{}", report.render());
        return Ok(());
    }

    config.validate()?;
    if config.preview {
        print!("{}", preview_output(&config)?);
        return Ok(());
    }

    init_logging(&config);
    tracing::info!(log_file = %log_file_path().display(), "stopwatch started");
    let result = run_tui();
    match &result {
        Ok(()) => tracing::info!("stopwatch exiting"),
        Err(err) => tracing::error!(error = %format!("{err:#}"), "stopwatch exiting with error"),
    }
    result
}

fn run_tui() -> Result<()> {
    let guard = TerminalRestoreGuard::new();
    let mut stdout = io::stdout();
    guard
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    guard
        .enter_alt_screen(&mut stdout)
        .context("failed to enter alternate screen")?;
    guard
        .hide_cursor(&mut stdout)
        .context("failed to hide cursor")?;

    let mut state = EventLoopState::new(Instant::now());
    let mut deps = EventLoopDeps {
        surface: CrosstermSurface::new(stdout),
        sink: FileHistorySink::default(),
    };
    let result = run_event_loop(&mut state, &mut deps).context("event loop failed");
    guard.restore();
    result
}

fn preview_output(config: &AppConfig) -> Result<String> {
    let lines = render_preview(config.rows, config.cols).context("failed to render preview")?;
    let mut output = String::new();
    for line in lines {
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_output_has_one_line_per_row() {
        let config = AppConfig::parse_from(["stopwatch", "--preview", "--rows", "25", "--cols", "80"]);
        let output = preview_output(&config).expect("preview");
        assert_eq!(output.lines().count(), 25);
        assert!(output.contains("START-STOP WATCH"));
        assert!(output.contains("Commands"));
    }

    #[test]
    fn invalid_preview_size_is_rejected() {
        let err = run_with_args(["stopwatch", "--preview", "--rows", "0"]).unwrap_err();
        assert!(err.to_string().contains("--rows"));
    }

    #[test]
    fn doctor_skips_validation_failures() {
        assert!(run_with_args(["stopwatch", "--doctor", "--cols", "0"]).is_ok());
    }
}
