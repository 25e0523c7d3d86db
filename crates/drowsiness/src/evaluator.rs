//! Per-frame evaluation orchestration

use eye_geometry::{average_ear, FaceObservation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DrowsinessConfig;
use crate::session::DrowsinessSession;
use crate::signal::{FrameSignal, SignalLoss, Verdict};

/// Result of evaluating one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether sustained eye closure is confirmed
    pub drowsy: bool,

    /// Whether the detector reported at least one face
    pub face_detected: bool,

    /// Averaged EAR for the evaluated face
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear: Option<f32>,

    /// Continuous closure time so far (milliseconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closure_ms: Option<u64>,

    /// Diagnostic reason when no usable signal was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SignalLoss>,
}

impl FrameAnalysis {
    fn signal_lost(verdict: Verdict, face_detected: bool) -> Self {
        Self {
            drowsy: verdict.drowsy,
            face_detected,
            ear: None,
            closure_ms: None,
            reason: verdict.reason,
        }
    }
}

/// Drives one subject's state machine from per-frame face observations.
///
/// Owns the subject's `DrowsinessSession` exclusively; callers hand in each
/// frame's observations and read back the analysis.
#[derive(Debug)]
pub struct FrameEvaluator {
    session: DrowsinessSession,
}

impl FrameEvaluator {
    /// Create an evaluator with the given thresholds
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            session: DrowsinessSession::new(config),
        }
    }

    /// Evaluate all face observations for one frame.
    ///
    /// Only the first face in detector-reported order is evaluated; extra
    /// faces are ignored. Streams are keyed per subject upstream, so a
    /// second face in a frame is a detector artifact, not a subject to
    /// disambiguate.
    pub fn evaluate(&mut self, faces: &[FaceObservation], timestamp_ms: u64) -> FrameAnalysis {
        let Some(face) = faces.first() else {
            let verdict = self
                .session
                .evaluate(FrameSignal::NoSignal(SignalLoss::NoFaceDetected), timestamp_ms);
            return FrameAnalysis::signal_lost(verdict, false);
        };

        match average_ear(face) {
            Some(ear) => {
                debug!(ear, timestamp_ms, "frame EAR");
                let verdict = self.session.evaluate(FrameSignal::EyeState(ear), timestamp_ms);
                FrameAnalysis {
                    drowsy: verdict.drowsy,
                    face_detected: true,
                    ear: Some(ear),
                    closure_ms: self.session.closed_for_ms(timestamp_ms),
                    reason: verdict.reason,
                }
            }
            None => {
                let verdict = self
                    .session
                    .evaluate(FrameSignal::NoSignal(SignalLoss::LandmarksInvalid), timestamp_ms);
                FrameAnalysis::signal_lost(verdict, true)
            }
        }
    }

    /// The underlying session state
    pub fn session(&self) -> &DrowsinessSession {
        &self.session
    }

    /// Clear the session timer (subject change)
    pub fn reset(&mut self) {
        self.session.reset();
    }
}
