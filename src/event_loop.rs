//! Single-threaded poll/redraw/sleep loop.
//!
//! Each tick polls the surface size (re-laying out on change), reads at most
//! one key, applies it to the stopwatch, redraws what changed, and presents.
//! The loop sleeps a fixed short interval between ticks and never blocks
//! anywhere else.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::history::HistoryRing;
use crate::input::command_for_key;
use crate::persist::HistorySink;
use crate::render::Presenter;
use crate::surface::{BufferSurface, RenderSurface};
use crate::timer::{Stopwatch, Transition};

/// Delay between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);

const FALLBACK_ROWS: u16 = 24;
const FALLBACK_COLS: u16 = 80;

/// Everything the loop owns for the life of the process.
#[derive(Debug, Clone)]
pub struct EventLoopState {
    pub stopwatch: Stopwatch,
    pub presenter: Presenter,
    /// Size at the last layout; `None` until the first frame.
    pub last_size: Option<(u16, u16)>,
    pub quit_requested: bool,
}

impl EventLoopState {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            stopwatch: Stopwatch::new(now),
            presenter: Presenter::new(FALLBACK_ROWS, FALLBACK_COLS),
            last_size: None,
            quit_requested: false,
        }
    }
}

/// External collaborators the loop drives.
pub struct EventLoopDeps<S, P> {
    pub surface: S,
    pub sink: P,
}

/// Some terminals report 0x0 before they are fully attached.
fn resolved_size((rows, cols): (u16, u16)) -> (u16, u16) {
    if rows == 0 || cols == 0 {
        (FALLBACK_ROWS, FALLBACK_COLS)
    } else {
        (rows, cols)
    }
}

/// Run one tick. Returns `false` once quit has been requested.
pub fn tick<S: RenderSurface, P: HistorySink>(
    state: &mut EventLoopState,
    deps: &mut EventLoopDeps<S, P>,
    now: Instant,
) -> io::Result<bool> {
    if state.quit_requested {
        return Ok(false);
    }

    let mut drawn = false;
    let size = resolved_size(deps.surface.query_size()?);
    if state.last_size != Some(size) {
        let (rows, cols) = size;
        state.presenter.relayout(rows, cols);
        state
            .presenter
            .draw_frame(&mut deps.surface, &state.stopwatch, now)?;
        state.last_size = Some(size);
        drawn = true;
    }

    let transition = match deps.surface.read_key()? {
        Some(key) => match command_for_key(&key) {
            Some(command) => state.stopwatch.apply(command, now, &mut deps.sink),
            None => {
                debug!(code = ?key.code, "ignored key");
                Transition::default()
            }
        },
        None => Transition::default(),
    };
    if transition.quit {
        state.quit_requested = true;
    }

    drawn |= state
        .presenter
        .update(&mut deps.surface, &mut state.stopwatch, now, &transition)?;
    if drawn {
        deps.surface.present()?;
    }
    Ok(true)
}

/// Tick until quit, sleeping [`TICK_INTERVAL`] between ticks.
pub fn run_event_loop<S: RenderSurface, P: HistorySink>(
    state: &mut EventLoopState,
    deps: &mut EventLoopDeps<S, P>,
) -> io::Result<()> {
    while tick(state, deps, Instant::now())? {
        thread::sleep(TICK_INTERVAL);
    }
    debug!("event loop finished");
    Ok(())
}

/// Render the first frame at a fixed size without touching the terminal.
pub fn render_preview(rows: u16, cols: u16) -> io::Result<Vec<String>> {
    let now = Instant::now();
    let mut state = EventLoopState::new(now);
    let mut deps = EventLoopDeps {
        surface: BufferSurface::new(rows, cols),
        sink: NoopSink,
    };
    tick(&mut state, &mut deps, now)?;
    Ok(deps
        .surface
        .lines()
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect())
}

struct NoopSink;

impl HistorySink for NoopSink {
    fn write_history(&mut self, _history: &HistoryRing) -> io::Result<()> {
        Ok(())
    }
}
