use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use lapwatch_core::Ticker;

use crate::AppOp;

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Posts `AppOp::Pump` into the event loop every period until cancelled.
pub struct PumpTicker {
    events: Sender<AppOp>,
    worker: Option<Worker>,
}

impl PumpTicker {
    pub fn new(events: Sender<AppOp>) -> Self {
        Self { events, worker: None }
    }
}

impl Ticker for PumpTicker {
    fn schedule(&mut self, period_ms: u64) {
        self.cancel();

        let (stop, stop_rx) = mpsc::channel::<()>();
        let events = self.events.clone();
        let period = Duration::from_millis(period_ms.max(1));
        let handle = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if events.send(AppOp::Pump).is_err() {
                        break;
                    }
                }
                // Stop requested or the ticker went away.
                _ => break,
            }
        });
        log::debug!("pump started, period {} ms", period_ms);
        self.worker = Some(Worker { stop, handle });
    }

    fn cancel(&mut self) {
        if let Some(worker) = self.worker.take() {
            drop(worker.stop);
            if worker.handle.join().is_err() {
                log::error!("pump thread panicked");
            }
            log::debug!("pump stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for PumpTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;

    #[test]
    fn test_pump_delivers_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let mut pump = PumpTicker::new(tx);
        assert!(!pump.is_active());

        pump.schedule(10);
        assert!(pump.is_active());
        let op = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(op, AppOp::Pump));

        pump.cancel();
        assert!(!pump.is_active());
        // Anything sent before the join is already queued.
        while rx.try_recv().is_ok() {}
        std::thread::sleep(Duration::from_millis(50));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_reschedule_replaces_worker() {
        let (tx, rx) = mpsc::channel();
        let mut pump = PumpTicker::new(tx);
        pump.schedule(1000);
        pump.schedule(10);
        assert!(pump.is_active());
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
        drop(pump);
        while rx.try_recv().is_ok() {}
        // Every sender is gone once the pump is dropped.
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
    }
}
