//! Frame Evaluation Route

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::AppState;
use drowsiness::FrameAnalysis;
use eye_geometry::{EyeLandmarks, FaceObservation, LandmarkError, Point2};

/// Rejection of a malformed frame, distinct from any verdict
#[derive(Debug, Error)]
pub enum FrameRejection {
    /// Landmark validation failed
    #[error("{0}")]
    Landmarks(#[from] LandmarkError),

    /// Face carried neither a full mesh nor both eye contours
    #[error("face needs either `landmarks` or both `left_eye` and `right_eye`")]
    MissingLandmarks,
}

impl IntoResponse for FrameRejection {
    fn into_response(self) -> Response {
        // Rejections carry an explicit drowsy=false so verdict consumers
        // that ignore the status code still fail open
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "drowsy": false,
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// One face's landmarks: either both 6-point eye contours, or a full
/// 68-point face mesh the eye regions are sliced from
#[derive(Debug, Clone, Deserialize)]
pub struct FaceDto {
    /// Left-eye contour, 6 [x, y] points in anatomical index order
    #[serde(default)]
    pub left_eye: Option<Vec<[f32; 2]>>,

    /// Right-eye contour, 6 [x, y] points in anatomical index order
    #[serde(default)]
    pub right_eye: Option<Vec<[f32; 2]>>,

    /// Full 68-point face mesh (dlib layout)
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 2]>>,
}

impl FaceDto {
    /// Validate into a domain observation
    pub fn into_observation(self) -> Result<FaceObservation, FrameRejection> {
        if let Some(mesh) = self.landmarks {
            let points: Vec<Point2> = mesh.into_iter().map(Point2::from).collect();
            return Ok(FaceObservation::from_face_mesh(&points)?);
        }

        match (self.left_eye, self.right_eye) {
            (Some(left), Some(right)) => {
                let left: Vec<Point2> = left.into_iter().map(Point2::from).collect();
                let right: Vec<Point2> = right.into_iter().map(Point2::from).collect();
                Ok(FaceObservation::new(
                    EyeLandmarks::from_slice(&left)?,
                    EyeLandmarks::from_slice(&right)?,
                ))
            }
            _ => Err(FrameRejection::MissingLandmarks),
        }
    }
}

/// Request body for frame evaluation
#[derive(Debug, Deserialize)]
pub struct EvaluateFrameRequest {
    /// Monitored subject/stream this frame belongs to
    pub subject_id: String,

    /// Frame timestamp in milliseconds; non-decreasing per subject
    pub timestamp_ms: u64,

    /// Detected faces in detector-reported order
    #[serde(default)]
    pub faces: Vec<FaceDto>,
}

/// Response body for frame evaluation
#[derive(Debug, Serialize)]
pub struct EvaluateFrameResponse {
    pub subject_id: String,
    #[serde(flatten)]
    pub analysis: FrameAnalysis,
}

/// Evaluate one frame of landmark observations
pub async fn evaluate_frame(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateFrameRequest>,
) -> Result<Json<EvaluateFrameResponse>, FrameRejection> {
    debug!(
        subject_id = %request.subject_id,
        faces = request.faces.len(),
        "received frame"
    );

    let mut faces = Vec::with_capacity(request.faces.len());
    for face in request.faces {
        faces.push(face.into_observation()?);
    }

    let handle = state.registry.checkout(&request.subject_id).await;
    let analysis = handle.lock().await.evaluate(&faces, request.timestamp_ms);

    if analysis.drowsy {
        info!(
            subject_id = %request.subject_id,
            closure_ms = ?analysis.closure_ms,
            "drowsiness confirmed"
        );
    }

    Ok(Json(EvaluateFrameResponse {
        subject_id: request.subject_id,
        analysis,
    }))
}
