pub mod clock;
pub mod config;
pub mod doctor;
pub mod event_loop;
pub mod glyph;
pub mod history;
pub mod input;
pub mod layout;
mod logging;
pub mod persist;
pub mod render;
pub mod surface;
pub mod terminal_restore;
pub mod timer;

pub use logging::{init_logging, log_file_path, logging_enabled};
pub use timer::{Command, RunState, Stopwatch};
