use std::sync::Arc;

use crate::candidates::CandidateStore;
use crate::search::ranker::Ranker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable candidate source. Default: `PgCandidateStore`.
    pub store: Arc<dyn CandidateStore>,
    pub ranker: Arc<Ranker>,
}
