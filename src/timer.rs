//! Stopwatch state machine: run/pause, reset, laps and saving.
//!
//! Every command is total. The only side effect that can fail is writing the
//! history, and that failure is logged and otherwise ignored.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::clock::ElapsedClock;
use crate::history::HistoryRing;
use crate::persist::HistorySink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reset,
    Lap,
    Save,
    TogglePause,
}

/// Transient status text shown on the prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMessage {
    LapRecorded,
    Paused,
    HistorySaved,
}

impl PromptMessage {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::LapRecorded => "Current time saved to history.",
            Self::Paused => "Timer paused.",
            Self::HistorySaved => "Data saved to file.",
        }
    }
}

/// What a command changed, so the presenter redraws only those parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub quit: bool,
    pub history_changed: bool,
    pub run_state_changed: bool,
    /// The displayed time jumped (reset), independent of normal ticking.
    pub clock_changed: bool,
}

impl Transition {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Stopwatch {
    state: RunState,
    clock: ElapsedClock,
    history: HistoryRing,
    prompt: Option<PromptMessage>,
}

impl Stopwatch {
    /// A running stopwatch whose zero is `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self::with_history(now, HistoryRing::new())
    }

    #[must_use]
    pub fn with_history(now: Instant, history: HistoryRing) -> Self {
        Self {
            state: RunState::Running,
            clock: ElapsedClock::new(now),
            history,
            prompt: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.elapsed(now, self.state == RunState::Running)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// Pending prompt message, if a command set one since the last call.
    pub fn take_prompt(&mut self) -> Option<PromptMessage> {
        self.prompt.take()
    }

    pub fn apply(
        &mut self,
        command: Command,
        now: Instant,
        sink: &mut dyn HistorySink,
    ) -> Transition {
        let mut transition = Transition::default();
        match command {
            Command::Quit => transition.quit = true,
            Command::Reset => {
                if self.state == RunState::Running {
                    self.record_lap(now);
                    transition.history_changed = true;
                }
                self.clock.rezero(now);
                transition.clock_changed = true;
            }
            Command::Lap => {
                self.record_lap(now);
                transition.history_changed = true;
            }
            Command::Save => match sink.write_history(&self.history) {
                Ok(()) => self.prompt = Some(PromptMessage::HistorySaved),
                Err(err) => warn!(error = %err, "failed to save history"),
            },
            Command::TogglePause => {
                match self.state {
                    RunState::Running => {
                        self.record_lap(now);
                        self.clock.freeze(now);
                        self.state = RunState::Paused;
                        self.prompt = Some(PromptMessage::Paused);
                        transition.history_changed = true;
                    }
                    RunState::Paused => {
                        self.clock.resume(now);
                        self.state = RunState::Running;
                    }
                }
                transition.run_state_changed = true;
            }
        }
        debug!(
            ?command,
            state = ?self.state,
            elapsed_ms = self.elapsed(now).as_millis() as u64,
            "applied command"
        );
        transition
    }

    fn record_lap(&mut self, now: Instant) {
        self.history.push(self.elapsed(now));
        self.prompt = Some(PromptMessage::LapRecorded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<HistoryRing>,
    }

    impl HistorySink for RecordingSink {
        fn write_history(&mut self, history: &HistoryRing) -> io::Result<()> {
            self.saved.push(history.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl HistorySink for FailingSink {
        fn write_history(&mut self, _history: &HistoryRing) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn starts_running_at_zero() {
        let start = Instant::now();
        let watch = Stopwatch::new(start);
        assert_eq!(watch.state(), RunState::Running);
        assert_eq!(watch.elapsed(start), Duration::ZERO);
        assert_eq!(watch.history().get(0), Some(Duration::ZERO));
    }

    #[test]
    fn reset_while_running_records_lap_then_zeroes() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        let at = start + secs(90);

        let transition = watch.apply(Command::Reset, at, &mut sink);

        assert!(transition.history_changed);
        assert!(transition.clock_changed);
        assert_eq!(watch.history().get(0), Some(secs(90)));
        assert_eq!(watch.elapsed(at), Duration::ZERO);
        assert_eq!(watch.elapsed(at + secs(3)), secs(3));
        assert_eq!(watch.state(), RunState::Running);
        assert_eq!(watch.take_prompt(), Some(PromptMessage::LapRecorded));
    }

    #[test]
    fn reset_while_paused_zeroes_without_lap() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        watch.apply(Command::TogglePause, start + secs(40), &mut sink);
        let history_before = watch.history().clone();
        watch.take_prompt();

        let transition = watch.apply(Command::Reset, start + secs(50), &mut sink);

        assert!(!transition.history_changed);
        assert!(transition.clock_changed);
        assert_eq!(watch.history(), &history_before);
        assert_eq!(watch.state(), RunState::Paused);
        assert_eq!(watch.elapsed(start + secs(500)), Duration::ZERO);
        assert_eq!(watch.take_prompt(), None);
    }

    #[test]
    fn lap_records_without_changing_state() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        let transition = watch.apply(Command::Lap, start + secs(7), &mut sink);
        assert!(transition.history_changed);
        assert!(!transition.run_state_changed);
        assert_eq!(watch.history().get(0), Some(secs(7)));
        assert_eq!(watch.elapsed(start + secs(8)), secs(8));
    }

    #[test]
    fn many_laps_keep_the_ten_most_recent() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        for lap in 1..=13 {
            watch.apply(Command::Lap, start + secs(lap), &mut sink);
        }
        let kept: Vec<u64> = watch.history().iter().map(|d| d.as_secs()).collect();
        assert_eq!(kept, vec![13, 12, 11, 10, 9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn pause_records_lap_and_freezes_display() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        let transition = watch.apply(Command::TogglePause, start + secs(12), &mut sink);
        assert!(transition.run_state_changed);
        assert!(transition.history_changed);
        assert!(watch.is_paused());
        assert_eq!(watch.history().get(0), Some(secs(12)));
        assert_eq!(watch.elapsed(start + secs(100)), secs(12));
        assert_eq!(watch.take_prompt(), Some(PromptMessage::Paused));
    }

    #[test]
    fn resume_continues_from_frozen_value() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        let paused_at = start + Duration::from_millis(4_250);
        watch.apply(Command::TogglePause, paused_at, &mut sink);
        let before = watch.elapsed(paused_at);

        let resumed_at = paused_at + secs(3_600);
        let transition = watch.apply(Command::TogglePause, resumed_at, &mut sink);

        assert!(transition.run_state_changed);
        assert!(!transition.history_changed);
        assert_eq!(watch.state(), RunState::Running);
        assert_eq!(watch.elapsed(resumed_at), before);
        assert_eq!(watch.elapsed(resumed_at + secs(1)), before + secs(1));
    }

    #[test]
    fn save_hands_history_to_sink() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let mut sink = RecordingSink::default();
        watch.apply(Command::Lap, start + secs(2), &mut sink);
        watch.take_prompt();

        let transition = watch.apply(Command::Save, start + secs(3), &mut sink);

        assert!(transition.is_empty());
        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].get(0), Some(secs(2)));
        assert_eq!(watch.take_prompt(), Some(PromptMessage::HistorySaved));
    }

    #[test]
    fn failed_save_is_silent() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let transition = watch.apply(Command::Save, start, &mut FailingSink);
        assert!(transition.is_empty());
        assert_eq!(watch.take_prompt(), None);
        assert_eq!(watch.state(), RunState::Running);
    }

    #[test]
    fn quit_only_raises_flag() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        let history = watch.history().clone();
        let transition = watch.apply(Command::Quit, start + secs(5), &mut FailingSink);
        assert!(transition.quit);
        assert_eq!(watch.history(), &history);
        assert_eq!(watch.state(), RunState::Running);
    }

    #[test]
    fn prompt_is_consumed_once() {
        let start = Instant::now();
        let mut watch = Stopwatch::new(start);
        watch.apply(Command::Lap, start, &mut RecordingSink::default());
        assert!(watch.take_prompt().is_some());
        assert!(watch.take_prompt().is_none());
    }
}
