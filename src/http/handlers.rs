use super::state::AppState;
use crate::error::TranscriptError;
use crate::transcript::{CaptionCue, TranscriptResult};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, Query, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Form,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct TranscriptParams {
    #[serde(alias = "videoId")]
    pub video_id: Option<String>,

    /// Preferred language; falls back to the configured default when empty
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub data: TranscriptData,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptData {
    pub transcript: Vec<CaptionCue>,
    pub metadata: TranscriptMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMetadata {
    #[serde(rename = "video_id")]
    pub video_id: String,
    pub language: String,
    pub requested_language: String,
    pub count: usize,
    pub total_duration: u64,
    pub total_duration_formatted: String,
}

impl TranscriptResponse {
    fn new(video_id: &str, result: TranscriptResult) -> Self {
        let metadata = TranscriptMetadata {
            video_id: video_id.to_string(),
            language: result.used_language.clone(),
            requested_language: result.requested_language.clone(),
            count: result.count,
            total_duration: result.total_duration_ms,
            total_duration_formatted: result.total_duration_formatted(),
        };

        Self {
            success: true,
            data: TranscriptData {
                transcript: result.cues,
                metadata,
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/transcript?video_id=...&lang=...
pub async fn get_transcript(
    State(state): State<AppState>,
    query: Result<Query<TranscriptParams>, QueryRejection>,
) -> Result<Json<TranscriptResponse>, TranscriptError> {
    let Query(params) = query.map_err(|e| TranscriptError::InvalidRequest(e.body_text()))?;
    fetch_transcript(state, params).await
}

/// POST /api/transcript with a JSON or urlencoded body carrying the same fields
pub async fn post_transcript(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<TranscriptResponse>, TranscriptError> {
    let params = read_body_params(request).await?;
    fetch_transcript(state, params).await
}

/// Urlencoded bodies go through `Form`; anything else is read as JSON whatever
/// its content type. An empty body carries no parameters.
async fn read_body_params(request: Request) -> Result<TranscriptParams, TranscriptError> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        let Form(params) = Form::<TranscriptParams>::from_request(request, &())
            .await
            .map_err(|e| TranscriptError::InvalidRequest(e.body_text()))?;
        return Ok(params);
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| TranscriptError::InvalidRequest(e.body_text()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TranscriptParams::default());
    }

    serde_json::from_slice(&body)
        .map_err(|e| TranscriptError::InvalidRequest(format!("Failed to parse JSON body: {}", e)))
}

async fn fetch_transcript(
    state: AppState,
    params: TranscriptParams,
) -> Result<Json<TranscriptResponse>, TranscriptError> {
    let video_id = params.video_id.unwrap_or_default();
    let video_id = video_id.trim();

    log::info!(
        "Fetching transcript for: {}, lang: {}",
        video_id,
        params.lang.as_deref().unwrap_or("(default)")
    );

    match state
        .transcripts
        .resolve(video_id, params.lang.as_deref())
        .await
    {
        Ok(result) => {
            log::info!("Success! Got {} items for {}", result.count, video_id);
            Ok(Json(TranscriptResponse::new(video_id, result)))
        }
        Err(e) => {
            match &e {
                TranscriptError::NoTranscriptAvailable {
                    last_error: Some(last),
                    ..
                } => log::error!("Error: {} (last failure: {})", e, last),
                _ => log::error!("Error: {}", e),
            }
            Err(e)
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
