/// Ctrl-C handling: the first interrupt stops the countdown, a later one exits at once
use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread;
use std::time::Duration;

use crate::error::Error;
use crate::terminal;

/// Receiving side, owned by the countdown loop.
#[derive(Debug)]
pub struct Interrupt {
    rx: Receiver<()>,
    fired: Cell<bool>,
}

/// Sending side. Dropping every handle disconnects the channel.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    tx: SyncSender<()>,
}

pub fn channel() -> (InterruptHandle, Interrupt) {
    let (tx, rx) = mpsc::sync_channel(1);
    let interrupt = Interrupt {
        rx,
        fired: Cell::new(false),
    };
    (InterruptHandle { tx }, interrupt)
}

impl InterruptHandle {
    /// Returns `false` once the receiving side is gone.
    pub fn trigger(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}

impl Interrupt {
    /// Installs the process-wide Ctrl-C handler. Can only succeed once per
    /// process.
    pub fn install() -> Result<Self, Error> {
        let (handle, interrupt) = channel();
        let mut received = 0usize;
        ctrlc::set_handler(move || {
            received += 1;
            tracing::debug!(count = received, "interrupt received");
            if received > 1 || !handle.trigger() {
                terminal::force_show_cursor();
                std::process::exit(0);
            }
        })?;
        Ok(interrupt)
    }

    /// Non-blocking check. Stays `true` once an interrupt has been seen.
    pub fn is_triggered(&self) -> bool {
        if !self.fired.get() && matches!(self.rx.try_recv(), Ok(())) {
            self.fired.set(true);
        }
        self.fired.get()
    }

    /// Blocks for up to `timeout`, returning early with `true` on interrupt.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.fired.get() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                self.fired.set(true);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                false
            }
        }
    }

    #[cfg(test)]
    fn is_disconnected(&self) -> bool {
        matches!(self.rx.try_recv(), Err(mpsc::TryRecvError::Disconnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn trigger_is_latched() {
        let (handle, interrupt) = channel();
        assert!(!interrupt.is_triggered());
        assert!(handle.trigger());
        assert!(handle.trigger());
        assert!(interrupt.is_triggered());
        assert!(interrupt.is_triggered());
        assert!(interrupt.wait_timeout(Duration::from_secs(60)));
    }

    #[test]
    fn wait_returns_early_on_trigger() {
        let (handle, interrupt) = channel();
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.trigger();
        });
        let started = Instant::now();
        assert!(interrupt.wait_timeout(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(30));
        sender.join().unwrap();
    }

    #[test]
    fn wait_times_out_quietly() {
        let (_handle, interrupt) = channel();
        assert!(!interrupt.wait_timeout(Duration::from_millis(10)));
        assert!(!interrupt.is_triggered());
    }

    #[test]
    fn dropped_handle_still_sleeps() {
        let (handle, interrupt) = channel();
        drop(handle);
        assert!(interrupt.is_disconnected());
        let started = Instant::now();
        assert!(!interrupt.wait_timeout(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn trigger_reports_missing_listener() {
        let (handle, interrupt) = channel();
        drop(interrupt);
        assert!(!handle.trigger());
    }
}
