use crate::{Control, Phase, Stopwatch};

pub const TICK_PERIOD_MS: u64 = 100;

/// A cancellable repeating tick. Implementations deliver ticks however the
/// host likes; the controller only schedules and cancels.
pub trait Ticker {
    fn schedule(&mut self, period_ms: u64);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

/// Stopwatch plus the ticker that drives it. The ticker is owned here and
/// nowhere else, so there is never more than one running.
pub struct Controller<T: Ticker> {
    stopwatch: Stopwatch,
    ticker: T,
    period_ms: u64,
}

impl<T: Ticker> Controller<T> {
    pub fn new(ticker: T) -> Self {
        Self::with_period(ticker, TICK_PERIOD_MS)
    }

    pub fn with_period(ticker: T, period_ms: u64) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            ticker,
            period_ms,
        }
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn press(&mut self, control: Control, now_ms: u64) -> bool {
        let was = self.stopwatch.phase();
        if !self.stopwatch.apply(control, now_ms) {
            return false;
        }
        match (was, self.stopwatch.phase()) {
            (Phase::Running, Phase::Running) => {}
            (_, Phase::Running) => {
                // Cancel before create; at most one ticker runs.
                self.ticker.cancel();
                self.ticker.schedule(self.period_ms);
            }
            _ => self.ticker.cancel(),
        }
        true
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.stopwatch.tick(now_ms);
    }
}

impl<T: Ticker> Drop for Controller<T> {
    fn drop(&mut self) {
        self.ticker.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Panics if scheduled while already active.
    #[derive(Default)]
    struct RecordingTicker {
        active: bool,
        scheduled: usize,
        last_period: u64,
        dropped_active: Rc<Cell<Option<bool>>>,
    }

    impl Ticker for RecordingTicker {
        fn schedule(&mut self, period_ms: u64) {
            assert!(!self.active, "ticker scheduled twice");
            self.active = true;
            self.scheduled += 1;
            self.last_period = period_ms;
        }

        fn cancel(&mut self) {
            self.active = false;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    impl Drop for RecordingTicker {
        fn drop(&mut self) {
            self.dropped_active.set(Some(self.active));
        }
    }

    #[test]
    fn test_start_schedules_default_period() {
        let mut ctl = Controller::new(RecordingTicker::default());
        assert!(!ctl.ticker().is_active());

        assert!(ctl.press(Control::Start, 10));
        assert!(ctl.ticker().is_active());
        assert_eq!(ctl.ticker().last_period, TICK_PERIOD_MS);
        assert_eq!(ctl.ticker().scheduled, 1);
    }

    #[test]
    fn test_lap_keeps_single_ticker() {
        let mut ctl = Controller::new(RecordingTicker::default());
        ctl.press(Control::Start, 0);
        ctl.tick(100);
        ctl.press(Control::Lap, 100);
        ctl.tick(200);
        ctl.press(Control::Lap, 200);
        assert_eq!(ctl.ticker().scheduled, 1);
        assert!(ctl.ticker().is_active());
        assert_eq!(ctl.stopwatch().laps(), &[0, 100, 100]);
    }

    #[test]
    fn test_stop_and_resume_cycle() {
        let mut ctl = Controller::with_period(RecordingTicker::default(), 50);
        for round in 0..3u64 {
            let base = round * 1000;
            if round == 0 {
                ctl.press(Control::Start, base);
            } else {
                assert!(ctl.press(Control::Resume, base));
            }
            assert!(ctl.ticker().is_active());
            ctl.tick(base + 100);
            ctl.press(Control::Stop, base + 100);
            assert!(!ctl.ticker().is_active());
        }
        assert_eq!(ctl.ticker().scheduled, 3);
        assert_eq!(ctl.ticker().last_period, 50);
        assert_eq!(ctl.stopwatch().elapsed_ms(), 300);
    }

    #[test]
    fn test_refused_press_leaves_ticker() {
        let mut ctl = Controller::new(RecordingTicker::default());
        assert!(!ctl.press(Control::Stop, 0));
        assert!(!ctl.ticker().is_active());

        ctl.press(Control::Start, 0);
        assert!(!ctl.press(Control::Resume, 5));
        assert!(!ctl.press(Control::Reset, 5));
        assert!(ctl.ticker().is_active());
        assert_eq!(ctl.ticker().scheduled, 1);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut ctl = Controller::new(RecordingTicker::default());
        ctl.press(Control::Start, 0);
        ctl.tick(300);
        ctl.press(Control::Stop, 300);
        assert!(ctl.press(Control::Reset, 400));
        assert_eq!(ctl.stopwatch().phase(), Phase::Idle);
        assert!(!ctl.ticker().is_active());

        assert!(ctl.press(Control::Start, 500));
        assert_eq!(ctl.stopwatch().laps(), &[0]);
    }

    #[test]
    fn test_drop_cancels_ticker() {
        let flag = Rc::new(Cell::new(None));
        let mut ticker = RecordingTicker::default();
        ticker.dropped_active = Rc::clone(&flag);
        let mut ctl = Controller::new(ticker);
        ctl.press(Control::Start, 0);
        drop(ctl);
        assert_eq!(flag.get(), Some(false));
    }
}
