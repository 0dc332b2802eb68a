/// Countdown engine: one blinking, colour-cycling `MM:SS` frame per tick
use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use crossterm::style::Color;
use tracing::{debug, info};

use crate::clock::{Clock, Wait};
use crate::config::Config;
use crate::cycler::Cycler;
use crate::interrupt::Interrupt;
use crate::terminal::{CursorGuard, Terminal};

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Counting,
    Done(Outcome),
}

/// Whole minutes and seconds left before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    pub fn until(deadline: Instant, now: Instant) -> Self {
        Self::from(deadline.saturating_duration_since(now))
    }

    /// `MM<separator>SS`, both sides zero-padded to two digits.
    pub fn display(self, separator: &str) -> String {
        format!("{:02}{separator}{:02}", self.minutes, self.seconds)
    }
}

impl From<Duration> for Remaining {
    fn from(left: Duration) -> Self {
        let secs = left.as_secs();
        Self {
            minutes: secs / 60,
            seconds: secs % 60,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(":"))
    }
}

/// Calls `tick` at `start`, `start + interval`, ... for every tick instant up
/// to and including `deadline`, then waits for the deadline itself. Ticks
/// missed during a late wake-up are dropped, so each wake-up draws once.
fn tick_until<C: Clock>(
    clock: &C,
    interrupt: &Interrupt,
    start: Instant,
    deadline: Instant,
    interval: Duration,
    mut tick: impl FnMut(Instant),
) -> Outcome {
    let mut next = start;
    while next <= deadline {
        if clock.wait_until(next, interrupt) == Wait::Interrupted {
            return Outcome::Interrupted;
        }
        let now = clock.now();
        tick(now);
        while next <= now {
            next += interval;
        }
    }
    match clock.wait_until(deadline, interrupt) {
        Wait::Reached => Outcome::Finished,
        Wait::Interrupted => Outcome::Interrupted,
    }
}

/// Writes a frame, then returns the cursor to the saved position so the next
/// write lands on top of it.
fn draw<T: Terminal>(terminal: &mut T, frame: &str, color: Color) -> io::Result<()> {
    terminal.write_colored(frame, color)?;
    terminal.restore_cursor_position()
}

/// A single-use countdown. Once it is `Done`, `run` only reports how it ended.
#[derive(Debug)]
pub struct Countdown {
    duration: Duration,
    tick_interval: Duration,
    deadline_pad: Duration,
    blinker: Cycler<&'static str>,
    colors: Cycler<Color>,
    state: State,
}

impl Countdown {
    /// # Panics
    ///
    /// Panics if `palette` is empty or the configured tick interval is zero.
    pub fn new(duration: Duration, palette: Vec<Color>, config: &Config) -> Self {
        assert!(!config.tick_interval.is_zero(), "tick interval must be positive");
        Self {
            duration,
            tick_interval: config.tick_interval,
            deadline_pad: config.deadline_pad,
            blinker: Cycler::new([config.separator, config.blank]),
            colors: Cycler::new(palette),
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the countdown to its deadline, or until `interrupt` fires. The
    /// cursor is hidden while counting and shown again on every exit path.
    pub fn run<T, C>(&mut self, terminal: &mut T, clock: &C, interrupt: &Interrupt) -> Outcome
    where
        T: Terminal,
        C: Clock,
    {
        if let State::Done(outcome) = self.state {
            return outcome;
        }

        let start = clock.now();
        let deadline = start + self.duration + self.deadline_pad;
        info!(duration = ?self.duration, palette = self.colors.period(), "countdown started");

        let mut cursor = CursorGuard::hide(terminal);
        if let Err(err) = cursor.save_cursor_position() {
            debug!(%err, "save cursor failed");
        }
        self.state = State::Counting;

        let blinker = &mut self.blinker;
        let colors = &mut self.colors;
        let outcome = tick_until(
            clock,
            interrupt,
            start,
            deadline,
            self.tick_interval,
            |now| {
                let remaining = Remaining::until(deadline, now);
                let frame = remaining.display(blinker.step());
                let color = colors.step();
                if let Err(err) = draw(&mut *cursor, &frame, color) {
                    debug!(%err, %frame, "frame render failed");
                }
            },
        );
        drop(cursor);

        info!(?outcome, "countdown ended");
        self.state = State::Done(outcome);
        outcome
    }
}
