//! Axum route handlers for the roadmap API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::Roadmap;
use crate::roadmap::progress::{score_progress, ProgressReport};
use crate::roadmap::prompts::{RECOMMENDATIONS_PROMPT_TEMPLATE, RECOMMENDATIONS_SYSTEM};
use crate::roadmap::service::MilestoneSelector;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MilestoneStatusRequest {
    /// Stable milestone id. Preferred.
    pub milestone_id: Option<Uuid>,
    /// Positional index, kept for the original wire shape.
    pub milestone_index: Option<usize>,
    pub completed: bool,
}

impl MilestoneStatusRequest {
    fn selector(&self) -> Result<MilestoneSelector, AppError> {
        match (self.milestone_id, self.milestone_index) {
            (Some(id), None) => Ok(MilestoneSelector::Id(id)),
            (None, Some(index)) => Ok(MilestoneSelector::Index(index)),
            _ => Err(AppError::Validation(
                "Provide exactly one of milestone_id or milestone_index".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub company: Option<String>,
    pub position: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/candidates/:candidate_id/roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = state.roadmaps.generate(candidate_id).await?;
    Ok(Json(roadmap))
}

/// POST /api/candidates/:candidate_id/roadmap/regenerate
pub async fn handle_regenerate_roadmap(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = state.roadmaps.regenerate(candidate_id).await?;
    Ok(Json(roadmap))
}

/// GET /api/candidates/:candidate_id/roadmap
pub async fn handle_get_candidate_roadmap(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = state.roadmaps.get_by_candidate(candidate_id).await?;
    Ok(Json(roadmap))
}

/// PUT /api/candidates/:candidate_id/roadmap/milestone
pub async fn handle_update_milestone(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<MilestoneStatusRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let selector = request.selector()?;
    // Resolving through the candidate's roadmap keeps the advisory
    // ownership check: a candidate can only reach their own document.
    let roadmap = state.roadmaps.get_by_candidate(candidate_id).await?;
    let updated = state
        .roadmaps
        .set_milestone_status(roadmap.id, selector, request.completed)
        .await?;
    Ok(Json(updated))
}

/// GET /api/roadmaps/:roadmap_id
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<Roadmap>, AppError> {
    let roadmap = state.roadmaps.get_by_id(roadmap_id).await?;
    Ok(Json(roadmap))
}

/// GET /api/roadmaps/:roadmap_id/progress
pub async fn handle_roadmap_progress(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<ProgressReport>, AppError> {
    let roadmap = state.roadmaps.get_by_id(roadmap_id).await?;
    Ok(Json(score_progress(&roadmap, chrono::Utc::now())))
}

/// GET /api/roadmaps/:roadmap_id/recommendations?company=..&position=..
pub async fn handle_target_recommendations(
    State(state): State<AppState>,
    Path(roadmap_id): Path<Uuid>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<Value>, AppError> {
    let company = params
        .company
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Company and position are required".to_string()))?;
    let position = params
        .position
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Company and position are required".to_string()))?;

    let roadmap = state.roadmaps.get_by_id(roadmap_id).await?;

    let is_target = roadmap.target_companies.iter().any(|tc| {
        tc.company.eq_ignore_ascii_case(company) && tc.position.eq_ignore_ascii_case(position)
    });
    if !is_target {
        return Err(AppError::Validation(
            "The specified company and position are not in the target companies list".to_string(),
        ));
    }

    let prompt = RECOMMENDATIONS_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{position}", position);

    let recommendations: Value = state
        .llm
        .call_json(&prompt, RECOMMENDATIONS_SYSTEM)
        .await
        .map_err(|e| AppError::ExternalService(format!("Recommendation call failed: {e}")))?;

    Ok(Json(recommendations))
}
