//! Frame driver: cooperative scheduling for the particle engine.
//!
//! Replaces a host frame-callback primitive with an explicit loop that feeds
//! a step function monotonically non-decreasing timestamps until cancelled.
//! Exactly one step is ever in flight; control-parameter updates made between
//! steps are observed whole at the next step boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply clonable cancellation flag shared between the driver and its host
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the driving loop stop after the in-flight step
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Repeatedly invokes a step function with timestamps drawn from a clock
pub struct FrameDriver {
    token: CancellationToken,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token the host can clone to cancel the loop from outside
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Drive `step` until the token is cancelled or `step` returns `false`.
    ///
    /// `clock` supplies timestamps in milliseconds; readings that run
    /// backwards are clamped to the last observed value, so `step` always
    /// sees a non-decreasing sequence.
    pub fn run<C, S>(&self, mut clock: C, mut step: S)
    where
        C: FnMut() -> f64,
        S: FnMut(f64) -> bool,
    {
        let mut last = f64::NEG_INFINITY;

        while !self.token.is_cancelled() {
            let mut now = clock();
            if now < last {
                now = last;
            }
            last = now;

            if !step(now) {
                break;
            }
        }

        log::debug!("frame driver stopped at t={:.1}ms", last.max(0.0));
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_returning_false_stops_loop() {
        let driver = FrameDriver::new();
        let mut tick = 0u64;
        let mut count = 0;
        driver.run(
            move || {
                let t = tick as f64 * 16.0;
                tick += 1;
                t
            },
            |_| {
                count += 1;
                count < 5
            },
        );
        assert_eq!(count, 5);
    }

    #[test]
    fn test_cancellation_halts_before_next_step() {
        let driver = FrameDriver::new();
        let token = driver.token();
        let mut count = 0;
        driver.run(
            || 0.0,
            |_| {
                count += 1;
                if count == 3 {
                    token.cancel();
                }
                true
            },
        );
        assert_eq!(count, 3);
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let driver = FrameDriver::new();
        // A clock that jumps backwards mid-run
        let readings = [0.0, 16.0, 8.0, 32.0, 40.0];
        let mut i = 0;
        let mut seen = Vec::new();
        driver.run(
            || {
                let t = readings[i];
                i += 1;
                t
            },
            |t| {
                seen.push(t);
                seen.len() < readings.len()
            },
        );
        for pair in seen.windows(2) {
            assert!(pair[1] >= pair[0], "timestamps went backwards: {:?}", seen);
        }
        assert_eq!(seen[2], 16.0);
    }

    #[test]
    fn test_pre_cancelled_token_runs_nothing() {
        let driver = FrameDriver::new();
        driver.token().cancel();
        let mut count = 0;
        driver.run(
            || 0.0,
            |_| {
                count += 1;
                true
            },
        );
        assert_eq!(count, 0);
    }
}
