use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a caption source for a single (video, language) attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("language '{requested}' not available (available: {})", available.join(", "))]
    LanguageUnavailable {
        requested: String,
        available: Vec<String>,
    },

    #[error("no captions returned")]
    Empty,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Missing video_id parameter")]
    MissingParameter,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No transcript available. Tried languages: {}", tried.join(", "))]
    NoTranscriptAvailable {
        video_id: String,
        tried: Vec<String>,
        last_error: Option<FetchError>,
    },
}

impl TranscriptError {
    pub fn video_id(&self) -> &str {
        match self {
            Self::MissingParameter | Self::InvalidRequest(_) => "unknown",
            Self::NoTranscriptAvailable { video_id, .. } => video_id,
        }
    }
}

impl IntoResponse for TranscriptError {
    fn into_response(self) -> Response {
        let timestamp = chrono::Utc::now().to_rfc3339();

        let mut body = json!({
            "success": false,
            "error": {
                "message": self.to_string(),
                "video_id": self.video_id(),
                "timestamp": timestamp,
            }
        });

        if matches!(self, Self::MissingParameter) {
            body["usage"] = json!({
                "method": "GET",
                "url": "/api/transcript",
                "parameters": {
                    "video_id": "YouTube video ID (required)",
                    "lang": "Language code (optional, default: zh-TW)"
                },
                "example": "/api/transcript?video_id=dQw4w9WgXcQ&lang=zh-TW"
            });
        }

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_transcript_message_lists_languages() {
        let err = TranscriptError::NoTranscriptAvailable {
            video_id: "abc".to_string(),
            tried: vec!["en".to_string(), "ja".to_string()],
            last_error: Some(FetchError::Empty),
        };
        assert_eq!(
            err.to_string(),
            "No transcript available. Tried languages: en, ja"
        );
        assert_eq!(err.video_id(), "abc");
    }

    #[test]
    fn test_language_unavailable_message() {
        let err = FetchError::LanguageUnavailable {
            requested: "ko".to_string(),
            available: vec!["en".to_string(), "fr".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "language 'ko' not available (available: en, fr)"
        );
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        assert_eq!(
            FetchError::Timeout(Duration::from_millis(500)).to_string(),
            "timed out after 500ms"
        );
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(2)).to_string(),
            "timed out after 2s"
        );
    }
}
