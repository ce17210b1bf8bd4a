use crate::transcript::{DEFAULT_LANGUAGE, FALLBACK_LANGUAGES};
use axum::response::Json;
use serde_json::{json, Value};

const SUPPORTED_LANGUAGES: [&str; 15] = [
    "zh-TW", "zh-CN", "en", "ja", "ko", "es", "fr", "de", "it", "pt", "ru", "ar", "hi", "th", "vi",
];

/// GET /api
/// Describes the transcript endpoint; nothing here depends on request state
pub async fn api_doc() -> Json<Value> {
    Json(json!({
        "name": "YouTube Transcript API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Get YouTube video transcripts/subtitles",
        "status": "online",
        "endpoints": {
            "/api/transcript": {
                "method": "GET, POST",
                "description": "Fetch transcript for a YouTube video",
                "parameters": {
                    "video_id": {
                        "type": "string",
                        "required": true,
                        "description": "YouTube video ID (11 characters); `videoId` is also accepted",
                        "example": "dQw4w9WgXcQ"
                    },
                    "lang": {
                        "type": "string",
                        "required": false,
                        "default": DEFAULT_LANGUAGE,
                        "description": "Language code (ISO 639-1)",
                        "examples": ["zh-TW", "zh-CN", "en", "ja", "ko", "es", "fr"]
                    }
                },
                "examples": [
                    {
                        "description": "Get Chinese (Traditional) transcript",
                        "url": "/api/transcript?video_id=dQw4w9WgXcQ&lang=zh-TW"
                    },
                    {
                        "description": "Get English transcript",
                        "url": "/api/transcript?video_id=dQw4w9WgXcQ&lang=en"
                    },
                    {
                        "description": "Auto-detect language",
                        "url": "/api/transcript?video_id=dQw4w9WgXcQ"
                    }
                ],
                "response": {
                    "success": true,
                    "data": {
                        "transcript": [
                            { "text": "Never gonna give you up", "offset": 0, "duration": 2500 }
                        ],
                        "metadata": {
                            "video_id": "dQw4w9WgXcQ",
                            "language": "en",
                            "requestedLanguage": "en",
                            "count": 47,
                            "totalDuration": 213000,
                            "totalDurationFormatted": "3:33"
                        }
                    }
                }
            }
        },
        "support": {
            "languages": SUPPORTED_LANGUAGES,
            "fallbackOrder": FALLBACK_LANGUAGES,
            "fallback": "Automatically tries multiple languages if requested language is not available"
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
