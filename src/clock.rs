/// Time source for the countdown loop
use std::time::Instant;

use crate::interrupt::Interrupt;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Reached,
    Interrupted,
}

pub trait Clock {
    fn now(&self) -> Instant;

    /// Blocks until `at`, or until `interrupt` fires.
    fn wait_until(&self, at: Instant, interrupt: &Interrupt) -> Wait;
}

/// Wall-clock time, sleeping on the interrupt channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_until(&self, at: Instant, interrupt: &Interrupt) -> Wait {
        loop {
            if interrupt.is_triggered() {
                return Wait::Interrupted;
            }
            let now = Instant::now();
            if now >= at {
                return Wait::Reached;
            }
            if interrupt.wait_timeout(at - now) {
                return Wait::Interrupted;
            }
        }
    }
}
