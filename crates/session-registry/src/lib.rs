//! Per-Subject Session Registry
//!
//! Every monitored subject/stream owns exactly one drowsiness session; the
//! registry keys sessions by subject id and puts each behind its own mutex
//! (single writer per session). Interleaving observations from different
//! streams into one session would corrupt the closure timer's continuity,
//! so no process-global session exists anywhere in this pipeline.

pub mod registry;

pub use registry::{SessionHandle, SessionRegistry, SessionSummary, SubjectSession};
