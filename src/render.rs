//! Presentation driver: turns stopwatch state into screen text.
//!
//! The full frame is drawn once per layout. After that only the parts a tick
//! actually changed are redrawn: the clock when its whole-second value moves,
//! and the history, pause banner, and prompt line when a command touched them.

use std::io;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::glyph::{draw_glyph, Glyph};
use crate::history::{format_entry, HistoryRing};
use crate::layout::{ClockStyle, Positions};
use crate::surface::{Canvas, RenderSurface};
use crate::timer::{PromptMessage, Stopwatch, Transition};

const TITLE: &str = "  ##  START-STOP WATCH  ##  ";
const DIVIDER: &str = "=";
const PAUSE_BANNER: &str = " === PAUSED === ";
const PAUSE_BANNER_BLANK: &str = "                ";
const HISTORY_TITLE: &str = "== Previous values ==";
const HISTORY_RULE: &str = "---------------------";
const COMMANDS_TITLE: &str = "== Commands ====================";
const COMMANDS_RULE: &str = "--------------------------------";
const SEPARATOR: &str = "|";
/// Hours at or above this no longer fit two glyph cells.
const HOURS_OVERFLOW: u64 = 100;

const COMMANDS_VERBOSE: [&str; 5] = [
    "  q:       leave             ",
    "  <SPACE>: start/pause       ",
    "  r:       reset to 0        ",
    "  l:       lap               ",
    "  s:       save history to file ",
];

const COMMANDS_COMPACT: [&str; 5] = [
    "  q:       leave",
    "  <SPACE>: pause",
    "  r:       reset",
    "  l:       lap  ",
    "  s:       save ",
];

#[derive(Debug, Clone)]
pub struct Presenter {
    positions: Positions,
    last_second: Option<u64>,
}

impl Presenter {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            positions: Positions::for_size(rows, cols),
            last_second: None,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Recompute positions for a new terminal size. The caller redraws the frame.
    pub fn relayout(&mut self, rows: u16, cols: u16) {
        self.positions = Positions::for_size(rows, cols);
        self.last_second = None;
        debug!(rows, cols, mode = ?self.positions.mode, "relayout");
    }

    fn canvas<'a>(&self, surface: &'a mut dyn RenderSurface) -> Canvas<'a> {
        Canvas::new(surface, self.positions.rows, self.positions.cols)
    }

    /// Clear the screen and draw every widget for the current layout.
    pub fn draw_frame(
        &mut self,
        surface: &mut dyn RenderSurface,
        watch: &Stopwatch,
        now: Instant,
    ) -> io::Result<()> {
        let mut canvas = self.canvas(surface);
        canvas.clear()?;
        self.draw_chrome(&mut canvas)?;
        self.draw_commands(&mut canvas)?;
        self.draw_history(&mut canvas, watch.history())?;
        self.draw_clock(&mut canvas, watch.elapsed(now))?;
        if watch.is_paused() {
            self.draw_pause_banner(&mut canvas, true)?;
        }
        self.draw_prompt(&mut canvas, None)
    }

    /// Per-tick redraw. Returns whether anything was drawn.
    pub fn update(
        &mut self,
        surface: &mut dyn RenderSurface,
        watch: &mut Stopwatch,
        now: Instant,
        transition: &Transition,
    ) -> io::Result<bool> {
        let second = watch.elapsed(now).as_secs();
        let clock_due = transition.clock_changed
            || transition.run_state_changed
            || self.last_second != Some(second);
        let paused = watch.is_paused();
        let prompt = watch.take_prompt();
        let mut canvas = self.canvas(surface);
        let mut drawn = false;

        if transition.history_changed {
            self.draw_history(&mut canvas, watch.history())?;
            drawn = true;
        }
        if transition.run_state_changed && !paused {
            self.draw_pause_banner(&mut canvas, false)?;
        }
        if clock_due {
            self.draw_clock(&mut canvas, watch.elapsed(now))?;
            self.draw_prompt(&mut canvas, None)?;
            drawn = true;
        }
        if paused && (transition.run_state_changed || clock_due) {
            self.draw_pause_banner(&mut canvas, true)?;
        }
        if let Some(message) = prompt {
            self.draw_prompt(&mut canvas, Some(message))?;
            drawn = true;
        }
        Ok(drawn)
    }

    fn draw_chrome(&self, canvas: &mut Canvas<'_>) -> io::Result<()> {
        let positions = &self.positions;
        let rule = DIVIDER.repeat(usize::from(positions.cols));
        for &row in &positions.dividers {
            canvas.put(0, row, &rule)?;
        }
        if let Some(header) = positions.header {
            canvas.put(header.title.x, header.title.y, TITLE)?;
            let version = format!(" v{} ", env!("CARGO_PKG_VERSION"));
            canvas.put(header.version.x, header.version.y, &version)?;
        }
        let history = &positions.history;
        for &row in &history.separator_rows {
            canvas.put(history.separator_col, row, SEPARATOR)?;
        }
        Ok(())
    }

    fn draw_commands(&self, canvas: &mut Canvas<'_>) -> io::Result<()> {
        let Some(commands) = self.positions.commands else {
            return Ok(());
        };
        if commands.titled {
            canvas.put(commands.origin.x, commands.origin.y, COMMANDS_TITLE)?;
            canvas.put(commands.origin.x, commands.origin.y + 1, COMMANDS_RULE)?;
        }
        let lines = if commands.verbose {
            &COMMANDS_VERBOSE
        } else {
            &COMMANDS_COMPACT
        };
        for (offset, line) in lines.iter().enumerate() {
            canvas.put(commands.body.x, commands.body.y + offset as i32, line)?;
        }
        Ok(())
    }

    pub fn draw_history(&self, canvas: &mut Canvas<'_>, history: &HistoryRing) -> io::Result<()> {
        let placement = &self.positions.history;
        if placement.titled {
            canvas.put(placement.origin.x, placement.origin.y, HISTORY_TITLE)?;
            canvas.put(placement.origin.x, placement.origin.y + 1, HISTORY_RULE)?;
        }
        for (idx, lap) in history.iter().take(placement.visible_entries).enumerate() {
            let row = placement.body.y + idx as i32;
            canvas.put(placement.body.x, row, &format_entry(idx, lap))?;
        }
        Ok(())
    }

    pub fn draw_clock(&mut self, canvas: &mut Canvas<'_>, elapsed: Duration) -> io::Result<()> {
        let total = elapsed.as_secs();
        let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
        match self.positions.clock.style {
            ClockStyle::BigGlyphs => {
                let (hours_tens, hours_ones) = if hours >= HOURS_OVERFLOW {
                    (Glyph::Bar, Glyph::Bar)
                } else {
                    (Glyph::digit(hours / 10), Glyph::digit(hours))
                };
                let glyphs = [
                    hours_tens,
                    hours_ones,
                    Glyph::Colon,
                    Glyph::digit(minutes / 10),
                    Glyph::digit(minutes),
                    Glyph::Colon,
                    Glyph::digit(seconds / 10),
                    Glyph::digit(seconds),
                ];
                for (glyph, cell) in glyphs.into_iter().zip(self.positions.clock_glyph_cells()) {
                    draw_glyph(canvas, glyph, cell.x, cell.y)?;
                }
            }
            ClockStyle::Compact => {
                let origin = self.positions.clock.origin;
                let text = format!("{hours:04}:{minutes:02}:{seconds:02}");
                canvas.put(origin.x, origin.y, &text)?;
            }
        }
        self.last_second = Some(total);
        Ok(())
    }

    /// Draw the banner, or blank its slot so no stale text is left behind.
    pub fn draw_pause_banner(&self, canvas: &mut Canvas<'_>, paused: bool) -> io::Result<()> {
        let cell = self.positions.pause_banner;
        let text = if paused {
            PAUSE_BANNER
        } else {
            PAUSE_BANNER_BLANK
        };
        canvas.put(cell.x, cell.y, text)
    }

    /// Show `message` on the prompt line, or clear the line when `None`.
    pub fn draw_prompt(
        &self,
        canvas: &mut Canvas<'_>,
        message: Option<PromptMessage>,
    ) -> io::Result<()> {
        let prompt = self.positions.prompt;
        if let Some(until) = prompt.clear_until {
            let width = (until - prompt.origin.x).max(0) as usize;
            canvas.put(prompt.origin.x, prompt.origin.y, &" ".repeat(width))?;
        }
        match message {
            Some(message) if prompt.shows_messages => {
                // Never spill into the columns the next clear will not reach.
                let limit = prompt.clear_until.unwrap_or(i32::from(self.positions.cols));
                let width = (limit - prompt.origin.x).max(0) as usize;
                let text: String = format!("> {}", message.text()).chars().take(width).collect();
                canvas.put(prompt.origin.x, prompt.origin.y, &text)
            }
            _ => Ok(()),
        }
    }
}
