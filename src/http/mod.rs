//! HTTP API for fetching transcripts
//!
//! - GET/POST /api/transcript - Fetch captions with language fallback
//! - GET /api, /api/index - Static API documentation
//! - GET /health - Health check

mod docs;
mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
