//! Adaptive screen layout.
//!
//! Terminal dimensions are classified into a (height, width) pair of size
//! classes, and every widget position is derived from that pair plus the raw
//! dimensions. Nothing here is cached; callers recompute after each resize.

/// Size tier for one terminal dimension, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    Tiny,
    Smaller,
    Small,
    Large,
}

/// Breakpoint tables, checked top-down: a dimension below the bound gets the paired class.
pub(crate) mod breakpoints {
    use super::SizeClass;

    pub const HEIGHT: [(u16, SizeClass); 3] = [
        (8, SizeClass::Tiny),
        (14, SizeClass::Smaller),
        (21, SizeClass::Small),
    ];

    pub const WIDTH: [(u16, SizeClass); 3] = [
        (35, SizeClass::Tiny),
        (47, SizeClass::Smaller),
        (61, SizeClass::Small),
    ];
}

fn classify_against(value: u16, table: &[(u16, SizeClass)]) -> SizeClass {
    table
        .iter()
        .find(|(bound, _)| value < *bound)
        .map_or(SizeClass::Large, |&(_, class)| class)
}

impl SizeClass {
    #[must_use]
    pub fn for_height(rows: u16) -> Self {
        classify_against(rows, &breakpoints::HEIGHT)
    }

    #[must_use]
    pub fn for_width(cols: u16) -> Self {
        classify_against(cols, &breakpoints::WIDTH)
    }

    fn is_roomy(self) -> bool {
        matches!(self, Self::Small | Self::Large)
    }

    fn is_cramped(self) -> bool {
        matches!(self, Self::Tiny | Self::Smaller)
    }
}

/// Presentation mode derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutMode {
    pub height: SizeClass,
    pub width: SizeClass,
}

impl LayoutMode {
    /// Whether the clock is drawn with the large seven-segment glyphs.
    #[must_use]
    pub fn uses_big_clock(self) -> bool {
        self.width.is_roomy() && self.height != SizeClass::Tiny
    }

    #[must_use]
    pub fn shows_commands(self) -> bool {
        self.height.is_roomy() && self.width.is_roomy()
    }

    /// Prompt messages are suppressed only when both dimensions are cramped.
    #[must_use]
    pub fn shows_prompt_messages(self) -> bool {
        !(self.height.is_cramped() && self.width.is_cramped())
    }

    #[must_use]
    pub fn shows_header(self) -> bool {
        self.width.is_roomy()
    }
}

#[must_use]
pub fn classify(rows: u16, cols: u16) -> LayoutMode {
    LayoutMode {
        height: SizeClass::for_height(rows),
        width: SizeClass::for_width(cols),
    }
}

/// Rows reserved at the bottom of the screen for the history and command panels.
#[must_use]
pub fn bottom_margin(height: SizeClass) -> u16 {
    match height {
        SizeClass::Tiny | SizeClass::Smaller => 2,
        SizeClass::Small => 8,
        SizeClass::Large => 15,
    }
}

/// Screen cell; may lie off screen on very small terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Column offsets of the eight big-clock cells: `HH:MM:SS`.
pub const CLOCK_GLYPH_OFFSETS: [i32; 8] = [0, 7, 13, 16, 23, 29, 32, 39];

const BIG_CLOCK_SHIFT: (i32, i32) = (22, 3);
const COMPACT_CLOCK_SHIFT: (i32, i32) = (5, 1);
const PAUSE_BANNER_SHIFT: (i32, i32) = (7, 1);
const HISTORY_INSET: i32 = 23;
const HISTORY_SEPARATOR_INSET: i32 = 26;
const HISTORY_LARGE_LINES: usize = 10;
const HISTORY_SMALL_LINES: usize = 5;
const VERSION_INSET: i32 = 8;
/// Columns kept free for the history column when the prompt shares its row.
const PROMPT_HISTORY_RESERVE: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    BigGlyphs,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockPlacement {
    /// Center point the clock is laid out around.
    pub anchor: Cell,
    /// Top-left of the first glyph, or start of the compact text line.
    pub origin: Cell,
    pub style: ClockStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPlacement {
    pub title: Cell,
    pub version: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPlacement {
    pub origin: Cell,
    /// Whether the title and rule occupy the first two rows.
    pub titled: bool,
    /// First history entry.
    pub body: Cell,
    pub visible_entries: usize,
    pub separator_col: i32,
    pub separator_rows: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandsPlacement {
    pub origin: Cell,
    pub titled: bool,
    pub body: Cell,
    /// Full command descriptions instead of one-word labels.
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptPlacement {
    pub origin: Cell,
    /// Exclusive column where clearing stops; `None` means the line is never cleared.
    pub clear_until: Option<i32>,
    pub shows_messages: bool,
}

/// All widget positions for one terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions {
    pub rows: u16,
    pub cols: u16,
    pub mode: LayoutMode,
    pub bottom_margin: u16,
    /// Rows carrying a full-width `=` divider.
    pub dividers: Vec<i32>,
    pub header: Option<HeaderPlacement>,
    pub clock: ClockPlacement,
    pub pause_banner: Cell,
    pub history: HistoryPlacement,
    pub commands: Option<CommandsPlacement>,
    pub prompt: PromptPlacement,
}

#[must_use]
pub fn compute_positions(rows: u16, cols: u16, mode: LayoutMode) -> Positions {
    let margin = bottom_margin(mode.height);
    let (rows_i, cols_i, margin_i) = (i32::from(rows), i32::from(cols), i32::from(margin));
    let large = mode.height == SizeClass::Large;

    let mut dividers = vec![0, rows_i - margin_i];
    if mode.height != SizeClass::Tiny && !dividers.contains(&(rows_i - 2)) {
        dividers.push(rows_i - 2);
    }

    let header = mode.shows_header().then(|| HeaderPlacement {
        title: Cell::new(2, 0),
        version: Cell::new(cols_i - VERSION_INSET, 0),
    });

    let anchor = Cell::new(cols_i / 2, (rows_i - margin_i - 1) / 2 + 2);
    let clock = if mode.uses_big_clock() {
        ClockPlacement {
            anchor,
            origin: anchor.offset(-BIG_CLOCK_SHIFT.0, -BIG_CLOCK_SHIFT.1),
            style: ClockStyle::BigGlyphs,
        }
    } else {
        ClockPlacement {
            anchor,
            origin: anchor.offset(-COMPACT_CLOCK_SHIFT.0, -COMPACT_CLOCK_SHIFT.1),
            style: ClockStyle::Compact,
        }
    };
    let pause_banner = anchor.offset(-PAUSE_BANNER_SHIFT.0, -PAUSE_BANNER_SHIFT.1);

    let history_origin = if large {
        Cell::new(cols_i - HISTORY_INSET, rows_i - margin_i + 1)
    } else {
        Cell::new(cols_i - HISTORY_INSET, rows_i - margin_i - 1)
    };
    let history = HistoryPlacement {
        origin: history_origin,
        titled: large,
        body: history_origin.offset(2, 2),
        visible_entries: if large {
            HISTORY_LARGE_LINES
        } else {
            HISTORY_SMALL_LINES
        },
        separator_col: cols_i - HISTORY_SEPARATOR_INSET,
        separator_rows: (3..margin_i).map(|up| rows_i - up).collect(),
    };

    let commands = mode.shows_commands().then(|| {
        let origin = Cell::new(2, rows_i - margin_i + 1);
        CommandsPlacement {
            origin,
            titled: large,
            body: if large { origin.offset(0, 2) } else { origin },
            verbose: mode.width == SizeClass::Large,
        }
    });

    let prompt = PromptPlacement {
        origin: Cell::new(0, rows_i - 1),
        clear_until: (mode.width != SizeClass::Tiny).then(|| {
            if mode.height.is_cramped() {
                cols_i - PROMPT_HISTORY_RESERVE
            } else {
                cols_i
            }
        }),
        shows_messages: mode.shows_prompt_messages(),
    };

    Positions {
        rows,
        cols,
        mode,
        bottom_margin: margin,
        dividers,
        header,
        clock,
        pause_banner,
        history,
        commands,
        prompt,
    }
}

impl Positions {
    /// Classify and lay out in one step.
    #[must_use]
    pub fn for_size(rows: u16, cols: u16) -> Self {
        compute_positions(rows, cols, classify(rows, cols))
    }

    /// Cells of the eight big-clock glyphs, left to right.
    #[must_use]
    pub fn clock_glyph_cells(&self) -> [Cell; 8] {
        CLOCK_GLYPH_OFFSETS.map(|dx| self.clock.origin.offset(dx, 0))
    }
}
