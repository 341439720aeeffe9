pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::matching::handlers as matching_handlers;
use crate::roadmap::handlers as roadmap_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate-facing roadmap API
        .route(
            "/api/candidates/:candidate_id/roadmap",
            post(roadmap_handlers::handle_generate_roadmap)
                .get(roadmap_handlers::handle_get_candidate_roadmap),
        )
        .route(
            "/api/candidates/:candidate_id/roadmap/regenerate",
            post(roadmap_handlers::handle_regenerate_roadmap),
        )
        .route(
            "/api/candidates/:candidate_id/roadmap/milestone",
            put(roadmap_handlers::handle_update_milestone),
        )
        // Roadmap documents
        .route(
            "/api/roadmaps/:roadmap_id",
            get(roadmap_handlers::handle_get_roadmap),
        )
        .route(
            "/api/roadmaps/:roadmap_id/progress",
            get(roadmap_handlers::handle_roadmap_progress),
        )
        .route(
            "/api/roadmaps/:roadmap_id/recommendations",
            get(roadmap_handlers::handle_target_recommendations),
        )
        .route(
            "/api/roadmaps/compatibility/:candidate_id",
            post(matching_handlers::handle_check_compatibility),
        )
        // Recruiter tooling
        .route(
            "/api/recruiters/job-description/analyze",
            post(matching_handlers::handle_analyze_job_description),
        )
        .with_state(state)
}
