//! In-flight drop guard

use std::time::{Duration, Instant};
use tracing::{trace, warn};

/// Admits one drop at a time.
///
/// A drop holds the guard while its cache mutation and outbound emits settle.
/// If the holder never calls [`DropGuard::finish`], the guard expires after
/// its timeout so the board cannot stay wedged.
#[derive(Debug, Clone)]
pub struct DropGuard {
    timeout: Duration,
    in_flight_since: Option<Instant>,
}

impl DropGuard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            in_flight_since: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Try to start a drop at `now`; false while another one is in flight
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if let Some(since) = self.in_flight_since {
            let held = now.saturating_duration_since(since);
            if held < self.timeout {
                trace!(held_ms = held.as_millis() as u64, "drop rejected, previous drop in flight");
                return false;
            }
            warn!(
                held_ms = held.as_millis() as u64,
                timeout_ms = self.timeout.as_millis() as u64,
                "drop guard expired, resetting"
            );
        }
        self.in_flight_since = Some(now);
        true
    }

    /// Release the guard
    pub fn finish(&mut self) {
        self.in_flight_since = None;
    }

    /// True if a drop started less than one timeout before `now`
    pub fn is_busy(&self, now: Instant) -> bool {
        self.in_flight_since
            .is_some_and(|since| now.saturating_duration_since(since) < self.timeout)
    }
}
