//! Per-frame signals and verdicts

use serde::{Deserialize, Serialize};

/// Why no usable eye signal was available for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLoss {
    /// The detector reported no faces
    #[serde(rename = "no face detected")]
    NoFaceDetected,

    /// A face was reported but its eye geometry is unusable
    #[serde(rename = "landmarks invalid")]
    LandmarksInvalid,
}

impl SignalLoss {
    /// Diagnostic reason string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoFaceDetected => "no face detected",
            Self::LandmarksInvalid => "landmarks invalid",
        }
    }
}

/// One frame's worth of input to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameSignal {
    /// Valid averaged EAR reading for the current frame
    EyeState(f32),

    /// No face detected, or landmarks present but geometrically degenerate
    NoSignal(SignalLoss),
}

/// State machine output for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether sustained eye closure is confirmed
    pub drowsy: bool,

    /// Diagnostic reason when the signal was lost
    pub reason: Option<SignalLoss>,
}

impl Verdict {
    /// Normal not-drowsy result
    pub fn not_drowsy() -> Self {
        Self {
            drowsy: false,
            reason: None,
        }
    }

    /// Sustained closure confirmed
    pub fn drowsy() -> Self {
        Self {
            drowsy: true,
            reason: None,
        }
    }

    /// Not drowsy because the signal was lost
    pub fn no_signal(cause: SignalLoss) -> Self {
        Self {
            drowsy: false,
            reason: Some(cause),
        }
    }
}
