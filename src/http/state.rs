use crate::transcript::TranscriptService;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub transcripts: Arc<TranscriptService>,
}

impl AppState {
    pub fn new(transcripts: TranscriptService) -> Self {
        Self {
            transcripts: Arc::new(transcripts),
        }
    }
}
