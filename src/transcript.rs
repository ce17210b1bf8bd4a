use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use ytranscript::{TranscriptConfig, YoutubeTranscript, YoutubeTranscriptError};

use crate::error::{FetchError, TranscriptError};
use crate::formatter::{clean_caption_text, format_duration, secs_to_ms};

pub const DEFAULT_LANGUAGE: &str = "zh-TW";
pub const FALLBACK_LANGUAGES: [&str; 5] = ["zh-TW", "zh-CN", "en", "ja", "ko"];

/// One timed caption line. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionCue {
    pub text: String,
    #[serde(rename = "offset")]
    pub offset_ms: u64,
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TranscriptResult {
    pub cues: Vec<CaptionCue>,
    pub used_language: String,
    pub requested_language: String,
    pub count: usize,
    pub total_duration_ms: u64,
}

impl TranscriptResult {
    fn new(cues: Vec<CaptionCue>, used_language: &str, requested_language: &str) -> Self {
        let total_duration_ms = cues.iter().map(|c| c.duration_ms).sum();
        Self {
            count: cues.len(),
            cues,
            used_language: used_language.to_string(),
            requested_language: requested_language.to_string(),
            total_duration_ms,
        }
    }

    pub fn total_duration_formatted(&self) -> String {
        format_duration(self.total_duration_ms)
    }
}

/// Something that can fetch the caption track of a video in one language.
#[async_trait]
pub trait CaptionFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str, lang: &str) -> Result<Vec<CaptionCue>, FetchError>;
}

/// Fetches captions from YouTube through `ytranscript`.
pub struct YoutubeCaptionFetcher;

#[async_trait]
impl CaptionFetcher for YoutubeCaptionFetcher {
    async fn fetch(&self, video_id: &str, lang: &str) -> Result<Vec<CaptionCue>, FetchError> {
        let config = TranscriptConfig {
            lang: Some(lang.to_string()),
        };

        match YoutubeTranscript::fetch_transcript(video_id, Some(config)).await {
            Ok(transcript) => Ok(transcript
                .into_iter()
                .map(|entry| CaptionCue {
                    text: clean_caption_text(&entry.text),
                    offset_ms: secs_to_ms(entry.offset),
                    duration_ms: secs_to_ms(entry.duration),
                })
                .collect()),
            Err(YoutubeTranscriptError::TranscriptNotAvailableLanguage(_, available, _)) => {
                Err(FetchError::LanguageUnavailable {
                    requested: lang.to_string(),
                    available,
                })
            }
            Err(e) => Err(FetchError::Upstream(e.to_string())),
        }
    }
}

/// Resolves a transcript by walking the candidate languages in order until one
/// yields captions.
#[derive(Clone)]
pub struct TranscriptService {
    fetcher: Arc<dyn CaptionFetcher>,
    default_language: String,
    attempt_timeout: Duration,
}

impl TranscriptService {
    pub fn new(fetcher: Arc<dyn CaptionFetcher>) -> Self {
        Self {
            fetcher,
            default_language: DEFAULT_LANGUAGE.to_string(),
            attempt_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_default_language(mut self, lang: impl Into<String>) -> Self {
        self.default_language = lang.into();
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Preferred language first, then the fixed fallbacks, without repeats.
    pub fn candidate_languages(preferred: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(FALLBACK_LANGUAGES.len() + 1);
        for lang in std::iter::once(preferred).chain(FALLBACK_LANGUAGES) {
            if !candidates.iter().any(|c| c == lang) {
                candidates.push(lang.to_string());
            }
        }
        candidates
    }

    pub async fn resolve(
        &self,
        video_id: &str,
        preferred_language: Option<&str>,
    ) -> Result<TranscriptResult, TranscriptError> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(TranscriptError::MissingParameter);
        }

        let requested = preferred_language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_language);

        let candidates = Self::candidate_languages(requested);
        let mut last_error = None;

        for lang in &candidates {
            let attempt = tokio::time::timeout(self.attempt_timeout, self.fetcher.fetch(video_id, lang));
            let outcome = match attempt.await {
                Ok(Ok(cues)) if cues.is_empty() => Err(FetchError::Empty),
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(self.attempt_timeout)),
            };

            match outcome {
                Ok(cues) => {
                    log::info!(
                        "Transcript for {} found in '{}' ({} cues)",
                        video_id,
                        lang,
                        cues.len()
                    );
                    return Ok(TranscriptResult::new(cues, lang, requested));
                }
                Err(e) => {
                    log::warn!("Failed with '{}' for {}: {}", lang, video_id, e);
                    last_error = Some(e);
                }
            }
        }

        Err(TranscriptError::NoTranscriptAvailable {
            video_id: video_id.to_string(),
            tried: candidates,
            last_error,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table and records every language it was asked for.
    #[derive(Default)]
    pub struct ScriptedFetcher {
        pub responses: HashMap<String, Result<Vec<CaptionCue>, FetchError>>,
        pub calls: Mutex<Vec<String>>,
        pub delay: Option<Duration>,
    }

    impl ScriptedFetcher {
        pub fn with(mut self, lang: &str, response: Result<Vec<CaptionCue>, FetchError>) -> Self {
            self.responses.insert(lang.to_string(), response);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CaptionFetcher for ScriptedFetcher {
        async fn fetch(&self, _video_id: &str, lang: &str) -> Result<Vec<CaptionCue>, FetchError> {
            self.calls.lock().unwrap().push(lang.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.responses
                .get(lang)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Upstream("no captions".to_string())))
        }
    }

    pub fn cues(durations: &[u64]) -> Vec<CaptionCue> {
        let mut offset = 0;
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let cue = CaptionCue {
                    text: format!("line {}", i),
                    offset_ms: offset,
                    duration_ms: d,
                };
                offset += d;
                cue
            })
            .collect()
    }

    fn service(fetcher: &Arc<ScriptedFetcher>) -> TranscriptService {
        TranscriptService::new(fetcher.clone())
    }

    #[test]
    fn test_candidate_languages_dedup() {
        assert_eq!(
            TranscriptService::candidate_languages("en"),
            vec!["en", "zh-TW", "zh-CN", "ja", "ko"]
        );
        assert_eq!(
            TranscriptService::candidate_languages("zh-TW"),
            vec!["zh-TW", "zh-CN", "en", "ja", "ko"]
        );
        assert_eq!(
            TranscriptService::candidate_languages("fr"),
            vec!["fr", "zh-TW", "zh-CN", "en", "ja", "ko"]
        );
    }

    #[test]
    fn test_candidate_languages_never_repeat() {
        for lang in FALLBACK_LANGUAGES {
            let candidates = TranscriptService::candidate_languages(lang);
            assert_eq!(candidates.len(), FALLBACK_LANGUAGES.len());
            assert_eq!(candidates[0], lang);
        }
    }

    #[tokio::test]
    async fn test_missing_video_id_skips_fetch() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        for id in ["", "   "] {
            let err = service(&fetcher).resolve(id, Some("en")).await.unwrap_err();
            assert!(matches!(err, TranscriptError::MissingParameter));
        }
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let fetcher = Arc::new(
            ScriptedFetcher::default()
                .with("zh-CN", Ok(vec![]))
                .with("en", Ok(cues(&[1000])))
                .with("ja", Ok(cues(&[2000]))),
        );

        let result = service(&fetcher).resolve("abc", Some("ko")).await.unwrap();

        assert_eq!(result.used_language, "en");
        assert_eq!(result.requested_language, "ko");
        assert_eq!(fetcher.calls(), vec!["ko", "zh-TW", "zh-CN", "en"]);
    }

    #[tokio::test]
    async fn test_exhaustion_tries_every_candidate_once() {
        let fetcher = Arc::new(ScriptedFetcher::default());

        let err = service(&fetcher).resolve("abc", Some("fr")).await.unwrap_err();

        match err {
            TranscriptError::NoTranscriptAvailable { tried, last_error, .. } => {
                assert_eq!(tried, vec!["fr", "zh-TW", "zh-CN", "en", "ja", "ko"]);
                assert_eq!(last_error, Some(FetchError::Upstream("no captions".to_string())));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fetcher.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_aggregates_count_and_duration() {
        let fetcher = Arc::new(ScriptedFetcher::default().with("zh-TW", Ok(cues(&[2500, 3000]))));

        let result = service(&fetcher).resolve("abc", None).await.unwrap();

        assert_eq!(result.used_language, "zh-TW");
        assert_eq!(result.requested_language, "zh-TW");
        assert_eq!(result.count, 2);
        assert_eq!(result.total_duration_ms, 5500);
        assert_eq!(result.total_duration_formatted(), "0:05");
        assert_eq!(fetcher.calls(), vec!["zh-TW"]);
    }

    #[tokio::test]
    async fn test_empty_language_uses_configured_default() {
        let fetcher = Arc::new(ScriptedFetcher::default().with("ja", Ok(cues(&[10]))));

        let result = service(&fetcher)
            .with_default_language("ja")
            .resolve("abc", Some(""))
            .await
            .unwrap();

        assert_eq!(result.used_language, "ja");
        assert_eq!(result.requested_language, "ja");
        assert_eq!(fetcher.calls(), vec!["ja"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempt_times_out_and_falls_through() {
        let fetcher = Arc::new(ScriptedFetcher {
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        });

        let err = service(&fetcher)
            .with_attempt_timeout(Duration::from_secs(2))
            .resolve("abc", Some("en"))
            .await
            .unwrap_err();

        match err {
            TranscriptError::NoTranscriptAvailable { last_error, .. } => {
                assert_eq!(last_error, Some(FetchError::Timeout(Duration::from_secs(2))));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fetcher.calls().len(), 5);
    }
}
