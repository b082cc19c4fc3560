//! Pure stopwatch logic with no platform dependencies.
//! Testable on host; the terminal front end feeds it clock readings.

mod laps;
mod ticker;

use std::fmt;

pub use laps::{analyze_laps, lap_rows, LapMark, LapRow};
pub use ticker::{Controller, Ticker, TICK_PERIOD_MS};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    Start,
    Lap,
    Stop,
    Resume,
    Reset,
}

impl Phase {
    /// Transition table. `None` means the control is refused in this phase.
    pub fn next(self, control: Control) -> Option<Phase> {
        match (self, control) {
            (Phase::Idle, Control::Start) => Some(Phase::Running),
            (Phase::Running, Control::Lap) => Some(Phase::Running),
            (Phase::Running, Control::Stop) => Some(Phase::Stopped),
            (Phase::Stopped, Control::Resume) => Some(Phase::Running),
            (Phase::Stopped, Control::Reset) => Some(Phase::Idle),
            _ => None,
        }
    }
}

/// Stopwatch state. `laps[0]` is the open lap accumulator, `laps[1..]` the
/// closed laps, newest first.
#[derive(Clone, Debug)]
pub struct Stopwatch {
    phase: Phase,
    start_ms: u64,
    now_ms: u64,
    laps: Vec<u64>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            start_ms: 0,
            now_ms: 0,
            laps: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    /// Closed laps, newest first. Excludes the accumulator.
    pub fn completed_laps(&self) -> &[u64] {
        self.laps.get(1..).unwrap_or(&[])
    }

    /// Time since the last start, lap or resume, as of the last tick.
    pub fn segment_ms(&self) -> u64 {
        match self.phase {
            Phase::Running => self.now_ms.saturating_sub(self.start_ms),
            _ => 0,
        }
    }

    /// The open lap as displayed: accumulator plus the running segment.
    pub fn current_lap_ms(&self) -> u64 {
        self.laps.first().copied().unwrap_or(0) + self.segment_ms()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.laps.iter().sum::<u64>() + self.segment_ms()
    }

    /// Applies `control` at clock reading `at_ms`. Returns false, leaving
    /// the state untouched, when the current phase refuses the control.
    pub fn apply(&mut self, control: Control, at_ms: u64) -> bool {
        let Some(next) = self.phase.next(control) else {
            return false;
        };
        match control {
            Control::Start => {
                self.laps = vec![0];
                self.start_ms = at_ms;
                self.now_ms = at_ms;
            }
            Control::Lap => {
                // Closed with the last ticked reading, not `at_ms`.
                let closed = self.current_lap_ms();
                self.laps[0] = closed;
                self.laps.insert(0, 0);
                self.start_ms = at_ms;
                self.now_ms = at_ms;
            }
            Control::Stop => {
                // Unlike a lap, no fresh accumulator is opened.
                self.laps[0] = self.current_lap_ms();
                self.start_ms = 0;
                self.now_ms = 0;
            }
            Control::Resume => {
                self.start_ms = at_ms;
                self.now_ms = at_ms;
            }
            Control::Reset => {
                self.laps.clear();
                self.start_ms = 0;
                self.now_ms = 0;
            }
        }
        self.phase = next;
        true
    }

    /// Refreshes the display reading. Ignored unless running.
    pub fn tick(&mut self, at_ms: u64) {
        if self.phase == Phase::Running {
            self.now_ms = at_ms;
        }
    }

    pub fn start(&mut self, at_ms: u64) -> bool {
        self.apply(Control::Start, at_ms)
    }

    pub fn lap(&mut self, at_ms: u64) -> bool {
        self.apply(Control::Lap, at_ms)
    }

    pub fn stop(&mut self) -> bool {
        self.apply(Control::Stop, 0)
    }

    pub fn resume(&mut self, at_ms: u64) -> bool {
        self.apply(Control::Resume, at_ms)
    }

    pub fn reset(&mut self) -> bool {
        self.apply(Control::Reset, 0)
    }
}

/// One of the two round buttons. A disabled button carries no control.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Button {
    pub label: &'static str,
    pub control: Option<Control>,
}

impl Button {
    pub fn is_enabled(&self) -> bool {
        self.control.is_some()
    }
}

/// Left and right buttons shown for `phase`.
pub fn controls(phase: Phase) -> [Button; 2] {
    match phase {
        Phase::Idle => [
            Button { label: "Lap", control: None },
            Button { label: "Start", control: Some(Control::Start) },
        ],
        Phase::Running => [
            Button { label: "Lap", control: Some(Control::Lap) },
            Button { label: "Stop", control: Some(Control::Stop) },
        ],
        Phase::Stopped => [
            Button { label: "Reset", control: Some(Control::Reset) },
            Button { label: "Start", control: Some(Control::Resume) },
        ],
    }
}

/// Duration split into display fields. Hours are never carried out of
/// `minutes`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Elapsed {
    pub minutes: u64,
    pub seconds: u8,
    pub centis: u8,
}

impl Elapsed {
    pub fn from_ms(ms: u64) -> Self {
        Self {
            minutes: ms / 60_000,
            seconds: ((ms / 1000) % 60) as u8,
            centis: ((ms % 1000) / 10) as u8,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}.{:02}", self.minutes, self.seconds, self.centis)
    }
}

/// Format milliseconds as "MM:SS.cc"
pub fn format_elapsed(ms: u64) -> String {
    Elapsed::from_ms(ms).to_string()
}
