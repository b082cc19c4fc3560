use lapwatch_core::{controls, Control, Controller, Ticker};

pub struct StopwatchState<T: Ticker> {
    pub controller: Controller<T>,
    pub lap_scroll_offset: usize,
}

impl<T: Ticker> StopwatchState<T> {
    pub fn new(ticker: T, tick_ms: u64) -> Self {
        Self {
            controller: Controller::with_period(ticker, tick_ms),
            lap_scroll_offset: 0,
        }
    }

    pub fn press(&mut self, control: Control, now_ms: u64) -> bool {
        let accepted = self.controller.press(control, now_ms);
        if accepted {
            log::info!("{:?} -> {:?}", control, self.controller.stopwatch().phase());
            if matches!(control, Control::Reset | Control::Lap) {
                self.lap_scroll_offset = 0;
            }
        } else {
            log::debug!(
                "{:?} refused while {:?}",
                control,
                self.controller.stopwatch().phase()
            );
        }
        accepted
    }

    /// Presses the left (0) or right (1) button, if it is enabled.
    pub fn press_button(&mut self, index: usize, now_ms: u64) -> bool {
        let phase = self.controller.stopwatch().phase();
        match controls(phase).get(index).and_then(|b| b.control) {
            Some(control) => self.press(control, now_ms),
            None => false,
        }
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.controller.tick(now_ms);
    }

    pub fn scroll_up(&mut self) {
        self.lap_scroll_offset = self.lap_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let rows = self.controller.stopwatch().laps().len();
        if self.lap_scroll_offset + 1 < rows {
            self.lap_scroll_offset += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapwatch_core::Phase;

    #[derive(Default)]
    struct NullTicker {
        active: bool,
    }

    impl Ticker for NullTicker {
        fn schedule(&mut self, _period_ms: u64) {
            self.active = true;
        }

        fn cancel(&mut self) {
            self.active = false;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn state() -> StopwatchState<NullTicker> {
        StopwatchState::new(NullTicker::default(), 100)
    }

    #[test]
    fn test_buttons_follow_phase() {
        let mut sw = state();
        // Disabled lap button.
        assert!(!sw.press_button(0, 0));
        assert!(sw.press_button(1, 0));
        assert_eq!(sw.controller.stopwatch().phase(), Phase::Running);

        sw.tick(250);
        assert!(sw.press_button(0, 250));
        assert_eq!(sw.controller.stopwatch().completed_laps(), &[250]);

        assert!(sw.press_button(1, 300));
        assert_eq!(sw.controller.stopwatch().phase(), Phase::Stopped);

        assert!(sw.press_button(1, 1000));
        assert_eq!(sw.controller.stopwatch().phase(), Phase::Running);
        assert!(sw.controller.ticker().is_active());
        assert!(!sw.press_button(2, 1000));
    }

    #[test]
    fn test_scroll_clamped_and_reset() {
        let mut sw = state();
        sw.scroll_down();
        assert_eq!(sw.lap_scroll_offset, 0);

        sw.press(Control::Start, 0);
        for t in 1..=4u64 {
            sw.tick(t * 100);
            sw.press(Control::Lap, t * 100);
        }
        assert_eq!(sw.controller.stopwatch().laps().len(), 5);

        for _ in 0..10 {
            sw.scroll_down();
        }
        assert_eq!(sw.lap_scroll_offset, 4);
        sw.scroll_up();
        assert_eq!(sw.lap_scroll_offset, 3);

        sw.press(Control::Stop, 500);
        assert_eq!(sw.lap_scroll_offset, 3);
        sw.press(Control::Reset, 500);
        assert_eq!(sw.lap_scroll_offset, 0);
        assert!(sw.controller.stopwatch().laps().is_empty());
    }
}
