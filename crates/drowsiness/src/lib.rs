//! Drowsiness Decision Engine
//!
//! Converts a per-frame eye-landmark signal into a stable drowsy/awake
//! verdict:
//! - EAR thresholding of each frame's averaged eye aspect ratio
//! - Hysteresis timing of continuous closure against a configured duration
//! - Reset-on-recovery under face loss or unusable landmarks
//!
//! The engine is synchronous and performs no I/O. Callers own one
//! `FrameEvaluator` per monitored subject; concurrent streams must never
//! share one (the closure timer's continuity would be corrupted).

pub mod config;
pub mod evaluator;
pub mod session;
pub mod signal;

pub use config::{ConfigError, DrowsinessConfig};
pub use evaluator::{FrameAnalysis, FrameEvaluator};
pub use session::DrowsinessSession;
pub use signal::{FrameSignal, SignalLoss, Verdict};
