//! Drowsiness hysteresis state machine

use tracing::debug;

use crate::config::DrowsinessConfig;
use crate::signal::{FrameSignal, Verdict};

/// Per-subject drowsiness timer state.
///
/// Two logical states — timer unset (awake) and timer set (timing a
/// closure) — collapsed into the single `timer_started_ms` field.
/// Timestamps are caller-supplied milliseconds and must be non-decreasing
/// within one session; elapsed math saturates rather than panicking if that
/// contract is violated.
#[derive(Debug, Clone)]
pub struct DrowsinessSession {
    config: DrowsinessConfig,
    timer_started_ms: Option<u64>,
}

impl DrowsinessSession {
    /// Create a session with the given thresholds
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            timer_started_ms: None,
        }
    }

    /// Evaluate one frame's signal.
    ///
    /// Rules, in order:
    /// 1. `NoSignal` clears the timer and reports not drowsy with the cause.
    /// 2. EAR at or above the threshold counts as open and clears the timer.
    /// 3. EAR below the threshold arms the timer on first sight, then
    ///    confirms drowsiness once the closure has lasted the configured
    ///    duration. The timer is NOT cleared on confirmation: every further
    ///    closed frame stays drowsy until an open or no-signal frame resets.
    pub fn evaluate(&mut self, signal: FrameSignal, timestamp_ms: u64) -> Verdict {
        match signal {
            FrameSignal::NoSignal(cause) => {
                self.clear_timer(cause.as_str());
                Verdict::no_signal(cause)
            }
            FrameSignal::EyeState(ear) if ear >= self.config.ear_threshold => {
                self.clear_timer("eyes open");
                Verdict::not_drowsy()
            }
            FrameSignal::EyeState(ear) => match self.timer_started_ms {
                None => {
                    debug!(ear, timestamp_ms, "eye closure timer armed");
                    self.timer_started_ms = Some(timestamp_ms);
                    Verdict::not_drowsy()
                }
                Some(started_ms) => {
                    let elapsed_ms = timestamp_ms.saturating_sub(started_ms);
                    if elapsed_ms >= self.config.closure_threshold_ms {
                        debug!(ear, elapsed_ms, "sustained eye closure confirmed");
                        Verdict::drowsy()
                    } else {
                        Verdict::not_drowsy()
                    }
                }
            },
        }
    }

    fn clear_timer(&mut self, why: &str) {
        if self.timer_started_ms.take().is_some() {
            debug!(why, "eye closure timer reset");
        }
    }

    /// Whether the closure timer is currently armed
    pub fn is_timing(&self) -> bool {
        self.timer_started_ms.is_some()
    }

    /// Continuous closure time as of `timestamp_ms`, if the timer is armed
    pub fn closed_for_ms(&self, timestamp_ms: u64) -> Option<u64> {
        self.timer_started_ms
            .map(|started_ms| timestamp_ms.saturating_sub(started_ms))
    }

    /// Configured thresholds
    pub fn config(&self) -> &DrowsinessConfig {
        &self.config
    }

    /// Clear the timer explicitly (subject change)
    pub fn reset(&mut self) {
        self.clear_timer("explicit reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalLoss;
    use proptest::prelude::*;

    fn session() -> DrowsinessSession {
        DrowsinessSession::new(DrowsinessConfig::default())
    }

    fn closed(ear: f32) -> FrameSignal {
        FrameSignal::EyeState(ear)
    }

    #[test]
    fn test_confirms_after_sustained_closure() {
        // ear_threshold 0.25, closure_threshold_ms 700
        let mut s = session();
        assert!(!s.evaluate(closed(0.18), 0).drowsy);
        assert!(!s.evaluate(closed(0.19), 300).drowsy);
        assert!(s.evaluate(closed(0.20), 800).drowsy);
    }

    #[test]
    fn test_confirms_exactly_at_threshold() {
        let mut s = session();
        assert!(!s.evaluate(closed(0.10), 0).drowsy);
        assert!(!s.evaluate(closed(0.10), 699).drowsy);
        assert!(s.evaluate(closed(0.10), 700).drowsy);
    }

    #[test]
    fn test_open_eye_restarts_accumulation() {
        let mut s = session();
        assert!(!s.evaluate(closed(0.18), 0).drowsy);
        assert!(!s.evaluate(FrameSignal::EyeState(0.30), 300).drowsy);
        // Timer restarted here, elapsed 0 < 700
        assert!(!s.evaluate(closed(0.18), 400).drowsy);
        assert!(!s.evaluate(closed(0.18), 1000).drowsy);
        assert!(s.evaluate(closed(0.18), 1100).drowsy);
    }

    #[test]
    fn test_no_signal_restarts_accumulation() {
        let mut s = session();
        assert!(!s.evaluate(closed(0.18), 0).drowsy);
        let verdict = s.evaluate(FrameSignal::NoSignal(SignalLoss::NoFaceDetected), 300);
        assert!(!verdict.drowsy);
        assert_eq!(verdict.reason, Some(SignalLoss::NoFaceDetected));
        assert!(!s.is_timing());
        // Closure must re-accumulate from zero
        assert!(!s.evaluate(closed(0.18), 400).drowsy);
        assert!(!s.evaluate(closed(0.18), 1000).drowsy);
    }

    #[test]
    fn test_no_signal_idempotent() {
        let mut s = session();
        for t in [0, 100, 200, 300] {
            let verdict = s.evaluate(FrameSignal::NoSignal(SignalLoss::LandmarksInvalid), t);
            assert!(!verdict.drowsy);
            assert_eq!(verdict.reason, Some(SignalLoss::LandmarksInvalid));
            assert!(!s.is_timing());
        }
    }

    #[test]
    fn test_ear_at_threshold_counts_as_open() {
        let mut s = session();
        assert!(!s.evaluate(closed(0.18), 0).drowsy);
        assert!(s.is_timing());
        s.evaluate(FrameSignal::EyeState(0.25), 300);
        assert!(!s.is_timing());
    }

    #[test]
    fn test_drowsy_plateau_until_recovery() {
        let mut s = session();
        s.evaluate(closed(0.10), 0);
        assert!(s.evaluate(closed(0.10), 700).drowsy);
        // Timer not re-armed on confirmation: still drowsy every frame
        assert!(s.evaluate(closed(0.10), 900).drowsy);
        assert!(s.evaluate(closed(0.10), 5000).drowsy);
        // One open frame ends the plateau
        assert!(!s.evaluate(FrameSignal::EyeState(0.30), 5100).drowsy);
        assert!(!s.evaluate(closed(0.10), 5200).drowsy);
    }

    #[test]
    fn test_closed_for_ms() {
        let mut s = session();
        assert_eq!(s.closed_for_ms(100), None);
        s.evaluate(closed(0.10), 100);
        assert_eq!(s.closed_for_ms(450), Some(350));
        s.reset();
        assert_eq!(s.closed_for_ms(500), None);
    }

    proptest! {
        /// For any run of closed frames at increasing times, drowsy starts
        /// exactly at the first frame where elapsed reaches the threshold.
        #[test]
        fn test_drowsy_iff_elapsed_reaches_threshold(
            start in 0u64..1_000_000,
            steps in proptest::collection::vec(1u64..500, 1..40),
        ) {
            let mut s = session();
            let threshold = s.config().closure_threshold_ms;

            prop_assert!(!s.evaluate(FrameSignal::EyeState(0.1), start).drowsy);
            let mut t = start;
            for step in steps {
                t += step;
                let verdict = s.evaluate(FrameSignal::EyeState(0.1), t);
                prop_assert_eq!(verdict.drowsy, t - start >= threshold);
            }
        }
    }
}
