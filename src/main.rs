mod config;
mod error;
mod pump;
mod stopwatch;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use lapwatch_core::Control;

use crate::config::Arguments;
use crate::error::AppError;
use crate::pump::PumpTicker;
use crate::stopwatch::StopwatchState;

/// Messages handled by the event loop. Keys come from the reader thread,
/// pumps from the ticker.
#[derive(Debug)]
pub enum AppOp {
    Redraw,
    Key(KeyEvent),
    Pump,
    Quit,
}

struct LapwatchApp {
    out: Stdout,
    epoch: Instant,
    stopwatch: StopwatchState<PumpTicker>,
    help_visible: bool,
}

impl LapwatchApp {
    fn new(events: Sender<AppOp>, tick_ms: u64) -> Self {
        Self {
            out: io::stdout(),
            epoch: Instant::now(),
            stopwatch: StopwatchState::new(PumpTicker::new(events), tick_ms),
            help_visible: false,
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn redraw(&mut self) -> Result<(), AppError> {
        let lines = if self.help_visible {
            ui::help_lines()
        } else {
            let (width, height) = terminal::size()?;
            ui::stopwatch_lines(
                self.stopwatch.controller.stopwatch(),
                self.stopwatch.lap_scroll_offset,
                width,
                height,
            )
        };
        ui::draw(&mut self.out, &lines)?;
        Ok(())
    }

    fn handle_pump(&mut self) -> Result<(), AppError> {
        let now = self.now_ms();
        self.stopwatch.tick(now);
        if !self.help_visible {
            self.redraw()?;
        }
        Ok(())
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        // If help screen is showing, any key dismisses it
        if self.help_visible {
            self.help_visible = false;
            return true;
        }

        let now = self.now_ms();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('?') | KeyCode::F(1) => self.help_visible = true,
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => {
                self.stopwatch.press_button(1, now);
            }
            KeyCode::Left => {
                self.stopwatch.press_button(0, now);
            }
            KeyCode::Char('l') => {
                self.stopwatch.press(Control::Lap, now);
            }
            KeyCode::Char('r') => {
                self.stopwatch.press(Control::Reset, now);
            }
            KeyCode::Up | KeyCode::Char('k') => self.stopwatch.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.stopwatch.scroll_down(),
            _ => {}
        }
        true
    }
}

/// Raw mode and the alternate screen for as long as this lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self, AppError> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

fn init_logging(arguments: &Arguments) -> Result<(), AppError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(arguments.log_level());
    if let Some(path) = &arguments.log_file {
        let file = File::create(path).map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn key_reader(events: Sender<AppOp>) {
    loop {
        let op = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppOp::Key(key),
            Ok(Event::Resize(..)) => AppOp::Redraw,
            Ok(_) => continue,
            Err(e) => {
                log::error!("terminal read failed: {}", e);
                events.send(AppOp::Quit).ok();
                break;
            }
        };
        if events.send(op).is_err() {
            break;
        }
    }
}

fn run(app: &mut LapwatchApp, events: &Receiver<AppOp>) -> Result<(), AppError> {
    app.redraw()?;
    loop {
        let op = events.recv().map_err(|_| AppError::ChannelClosed)?;
        log::trace!("{:?}", op);
        match op {
            AppOp::Redraw => app.redraw()?,
            AppOp::Key(key) => {
                if !app.handle_key(key) {
                    break;
                }
                app.redraw()?;
            }
            AppOp::Pump => app.handle_pump()?,
            AppOp::Quit => break,
        }
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    let arguments = Arguments::parse();
    init_logging(&arguments)?;
    log::info!("lapwatch starting, tick {} ms", arguments.tick_ms);

    let guard = TerminalGuard::enter()?;

    let (tx, rx) = mpsc::channel();
    let reader_tx = tx.clone();
    std::thread::spawn(move || key_reader(reader_tx));

    let mut app = LapwatchApp::new(tx, arguments.tick_ms);
    let result = run(&mut app, &rx);

    // Stops the pump before the terminal is restored.
    drop(app);
    drop(guard);

    if let Err(e) = &result {
        log::error!("lapwatch failed: {}", e);
    }
    result
}
