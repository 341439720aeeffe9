//! Axum route handlers for the matching API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::compatibility::{
    extract_skills, heuristic_compatibility, CandidateProfile, CompatibilityReport,
};
use crate::matching::jd_analysis::analyze_job_description;
use crate::models::requirement::JobRequirements;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    pub job_requirements: Option<JobRequirements>,
}

#[derive(Debug, Deserialize)]
pub struct JdAnalysisRequest {
    pub job_description: String,
}

/// POST /api/roadmaps/compatibility/:candidate_id
///
/// Scores the candidate against the posted job requirements. If the LLM
/// backend is unavailable the handler degrades to the deterministic
/// skill-overlap heuristic instead of surfacing the failure.
pub async fn handle_check_compatibility(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<CompatibilityReport>, AppError> {
    let requirements = request
        .job_requirements
        .ok_or_else(|| AppError::Validation("Job requirements are required".to_string()))?;

    let user = state
        .candidates
        .get_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    let candidate = user
        .candidate()
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    // A candidate without a resume or roadmap can still be scored; missing
    // pieces just mean a thinner profile.
    let resume_analysis = state
        .candidates
        .get_resume_analysis(candidate_id)
        .await?
        .unwrap_or_else(|| serde_json::json!({}));

    let milestones = match candidate.roadmap_id {
        Some(roadmap_id) => match state.roadmaps.get_by_id(roadmap_id).await {
            Ok(roadmap) => roadmap.milestones,
            Err(AppError::NotFound(_)) => vec![],
            Err(e) => return Err(e),
        },
        None => vec![],
    };

    let profile = CandidateProfile {
        skills: extract_skills(&resume_analysis),
        resume_analysis,
        completed_milestones: milestones.iter().filter(|m| m.completed).cloned().collect(),
        milestones,
    };

    match state.compat_scorer.score(&profile, &requirements).await {
        Ok(report) => Ok(Json(report)),
        Err(AppError::ExternalService(msg)) => {
            warn!("Compatibility scorer unavailable ({msg}); using heuristic fallback");
            Ok(Json(heuristic_compatibility(&profile, &requirements)))
        }
        Err(e) => Err(e),
    }
}

/// POST /api/recruiters/job-description/analyze
pub async fn handle_analyze_job_description(
    State(state): State<AppState>,
    Json(request): Json<JdAnalysisRequest>,
) -> Result<Json<JobRequirements>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let requirements = analyze_job_description(&request.job_description, &state.llm).await?;
    Ok(Json(requirements))
}
