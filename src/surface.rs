//! Character-cell render surfaces.
//!
//! The stopwatch never touches the terminal directly; it draws through a
//! [`RenderSurface`]. [`CrosstermSurface`] drives a real terminal and
//! [`BufferSurface`] keeps everything in memory for previews and tests.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyEvent, KeyEventKind},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthChar;

pub trait RenderSurface {
    fn clear(&mut self) -> io::Result<()>;

    /// Draw `text` starting at (`row`, `col`). Callers keep `text` inside the surface.
    fn draw_text(&mut self, row: u16, col: u16, text: &str) -> io::Result<()>;

    /// Current size as `(rows, cols)`.
    fn query_size(&mut self) -> io::Result<(u16, u16)>;

    /// Next pending key press, without blocking.
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;

    fn present(&mut self) -> io::Result<()>;
}

/// Terminal-backed surface. Output is queued and written on [`RenderSurface::present`].
pub struct CrosstermSurface<W: Write> {
    out: W,
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSurface for CrosstermSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row), Print(text))
    }

    fn query_size(&mut self) -> io::Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // Drain non-key events (resize, focus) so they never starve key reads.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// In-memory surface backed by a ratatui [`Buffer`], fed from a scripted key queue.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    buffer: Buffer,
    keys: VecDeque<KeyEvent>,
    presents: usize,
}

impl BufferSurface {
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, cols, rows)),
            keys: VecDeque::new(),
            presents: 0,
        }
    }

    /// Change the reported size, as a terminal resize would.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.buffer.resize(Rect::new(0, 0, cols, rows));
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    #[must_use]
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Text of one row, padded with spaces to the surface width.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        let area = self.buffer.area;
        if row >= area.height {
            return String::new();
        }
        (0..area.width)
            .map(|x| self.buffer.get(x, row).symbol())
            .collect()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.buffer.area.height)
            .map(|row| self.row_text(row))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl RenderSurface for BufferSurface {
    fn clear(&mut self) -> io::Result<()> {
        self.buffer.reset();
        Ok(())
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        let area = self.buffer.area;
        if row < area.height && col < area.width {
            self.buffer.set_string(col, row, text, Style::default());
        }
        Ok(())
    }

    fn query_size(&mut self) -> io::Result<(u16, u16)> {
        let area = self.buffer.area;
        Ok((area.height, area.width))
    }

    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

/// A surface view that clips signed coordinates to the known screen size.
///
/// Layout math may place widgets partly off screen on small terminals; those
/// cells are dropped here instead of wrapping.
pub struct Canvas<'a> {
    surface: &'a mut dyn RenderSurface,
    rows: u16,
    cols: u16,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut dyn RenderSurface, rows: u16, cols: u16) -> Self {
        Self {
            surface,
            rows,
            cols,
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.surface.clear()
    }

    pub fn put(&mut self, x: i32, y: i32, text: &str) -> io::Result<()> {
        if y < 0 || y >= i32::from(self.rows) || x >= i32::from(self.cols) {
            return Ok(());
        }
        let skip = (-x).max(0) as usize;
        let width = (i32::from(self.cols) - x.max(0)) as usize;
        let visible = clip_columns(text, skip, width);
        if visible.is_empty() {
            return Ok(());
        }
        self.surface.draw_text(y as u16, x.max(0) as u16, visible)
    }
}

/// Slice of `text` that skips `skip` display columns and keeps at most `width` more.
fn clip_columns(text: &str, skip: usize, width: usize) -> &str {
    let mut col = 0usize;
    let mut start = None;
    let mut end = text.len();
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if start.is_none() {
            if col >= skip {
                start = Some(idx);
            } else {
                col += ch_width;
                continue;
            }
        }
        if col + ch_width > skip + width {
            end = idx;
            break;
        }
        col += ch_width;
    }
    match start {
        Some(start) => &text[start..end],
        None => "",
    }
}
