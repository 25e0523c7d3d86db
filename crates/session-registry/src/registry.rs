//! Session registry implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use drowsiness::{DrowsinessConfig, FrameAnalysis, FrameEvaluator};
use eye_geometry::FaceObservation;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// One subject's exclusively-owned monitoring session
#[derive(Debug)]
pub struct SubjectSession {
    subject_id: String,
    session_id: Uuid,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    frames_evaluated: u64,
    evaluator: FrameEvaluator,
}

impl SubjectSession {
    fn new(subject_id: String, config: DrowsinessConfig) -> Self {
        let now = Utc::now();
        Self {
            subject_id,
            session_id: Uuid::new_v4(),
            created_at: now,
            last_seen: now,
            frames_evaluated: 0,
            evaluator: FrameEvaluator::new(config),
        }
    }

    /// Evaluate one frame and update bookkeeping
    pub fn evaluate(&mut self, faces: &[FaceObservation], timestamp_ms: u64) -> FrameAnalysis {
        self.frames_evaluated += 1;
        self.last_seen = Utc::now();
        self.evaluator.evaluate(faces, timestamp_ms)
    }

    /// Clear the closure timer without dropping the session
    pub fn reset(&mut self) {
        self.evaluator.reset();
    }

    /// Subject this session belongs to
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Unique id minted at session start
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Frames evaluated since session start
    pub fn frames_evaluated(&self) -> u64 {
        self.frames_evaluated
    }

    /// Snapshot for the sessions listing
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            subject_id: self.subject_id.clone(),
            session_id: self.session_id,
            created_at: self.created_at,
            last_seen: self.last_seen,
            frames_evaluated: self.frames_evaluated,
            timing: self.evaluator.session().is_timing(),
        }
    }
}

/// Snapshot of one session for listings
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub subject_id: String,
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub frames_evaluated: u64,
    /// Whether the closure timer is currently armed
    pub timing: bool,
}

/// Shared handle to one subject's session
pub type SessionHandle = Arc<Mutex<SubjectSession>>;

/// Registry of per-subject sessions.
///
/// Each session sits behind its own mutex: concurrent streams for different
/// subjects evaluate in parallel, frames for one subject serialize.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    config: DrowsinessConfig,
}

impl SessionRegistry {
    /// Create a registry; new sessions inherit `config`
    pub fn new(config: DrowsinessConfig) -> Self {
        info!(?config, "creating session registry");
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get or create the session for a subject
    pub async fn checkout(&self, subject_id: &str) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(subject_id) {
                return Arc::clone(handle);
            }
        }

        let mut sessions = self.sessions.write().await;
        // A racing checkout may have created it between the locks
        if let Some(handle) = sessions.get(subject_id) {
            return Arc::clone(handle);
        }

        debug!(subject_id, "starting session");
        let session = SubjectSession::new(subject_id.to_string(), self.config.clone());
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(subject_id.to_string(), Arc::clone(&handle));
        handle
    }

    /// Drop a subject's session; returns whether one existed
    pub async fn remove(&self, subject_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(subject_id).is_some();
        if removed {
            info!(subject_id, "session removed");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether any sessions are live
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Summaries of all live sessions
    pub async fn summaries(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.read().await;
        let mut summaries = Vec::with_capacity(sessions.len());
        for handle in sessions.values() {
            summaries.push(handle.lock().await.summary());
        }
        summaries
    }

    /// Evict sessions idle for longer than `max_idle`; returns the count
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;

        let mut stale = Vec::new();
        for (subject_id, handle) in sessions.iter() {
            if handle.lock().await.last_seen < cutoff {
                stale.push(subject_id.clone());
            }
        }
        for subject_id in &stale {
            sessions.remove(subject_id);
        }

        if !stale.is_empty() {
            info!(count = stale.len(), "evicted idle sessions");
        }
        stale.len()
    }
}
