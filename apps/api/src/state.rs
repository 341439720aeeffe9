use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::matching::compatibility::CompatibilityScorer;
use crate::roadmap::service::RoadmapService;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Roadmap orchestration: generation, reads, milestone mutation.
    pub roadmaps: Arc<RoadmapService>,
    /// Pluggable compatibility scorer. Default: LlmCompatibilityScorer; the
    /// handler degrades to the heuristic when it fails.
    pub compat_scorer: Arc<dyn CompatibilityScorer>,
    pub candidates: Arc<dyn CandidateStore>,
}
