//! Roadmap orchestration — generation, regeneration, reads, and the single
//! post-creation write path (milestone completion).
//!
//! Flow for generation: load candidate → require resume analysis → require
//! targets → gather recruiter requirements (best-effort) → planner draft
//! (or fallback template) → normalize → persist → link to candidate.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::{Roadmap, TargetSnapshot};
use crate::roadmap::normalizer::normalize;
use crate::roadmap::planner::{RawRoadmap, RoadmapPlanner};
use crate::store::{CandidateStore, JobRequirementStore, RoadmapStore};

/// Addresses a milestone within a roadmap document.
///
/// `Id` is the stable form. `Index` is positional and can be invalidated by
/// a concurrent regeneration between read and write; it is kept for the
/// original wire shape.
#[derive(Debug, Clone, Copy)]
pub enum MilestoneSelector {
    Id(Uuid),
    Index(usize),
}

pub struct RoadmapService {
    candidates: Arc<dyn CandidateStore>,
    requirements: Arc<dyn JobRequirementStore>,
    roadmaps: Arc<dyn RoadmapStore>,
    planner: Arc<dyn RoadmapPlanner>,
}

impl RoadmapService {
    pub fn new(
        candidates: Arc<dyn CandidateStore>,
        requirements: Arc<dyn JobRequirementStore>,
        roadmaps: Arc<dyn RoadmapStore>,
        planner: Arc<dyn RoadmapPlanner>,
    ) -> Self {
        Self {
            candidates,
            requirements,
            roadmaps,
            planner,
        }
    }

    /// Generates and persists a roadmap for the candidate, replacing the
    /// candidate's roadmap reference.
    pub async fn generate(&self, candidate_id: Uuid) -> Result<Roadmap, AppError> {
        let user = self
            .candidates
            .get_candidate(candidate_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
        let candidate = user
            .candidate()
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

        // Resume upload is enforced here, not at upload time: generation is
        // the first operation that needs the analysis.
        let resume_analysis = self
            .candidates
            .get_resume_analysis(candidate_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "No resume on file for this candidate. Upload a resume before generating a roadmap."
                        .to_string(),
                )
            })?;

        let targets = &candidate.target_companies;
        if targets.is_empty() {
            return Err(AppError::Validation(
                "Candidate has not specified target companies".to_string(),
            ));
        }

        // Best-effort recruiter context. No match just means the planner
        // receives less input.
        let mut matched = Vec::new();
        for target in targets {
            let mut rows = self
                .requirements
                .find_by_company_and_position(&target.company, &target.position)
                .await?;
            matched.append(&mut rows);
        }

        let raw = match self
            .planner
            .draft(&resume_analysis, targets, &matched)
            .await
        {
            Ok(raw) => raw,
            Err(e) if e.is_auth() => {
                warn!("Planner credential missing or rejected ({e}); using the fallback roadmap template");
                fallback_roadmap(&targets[0].position)
            }
            Err(e) => {
                warn!("Planner unreachable ({e}); using the fallback roadmap template");
                fallback_roadmap(&targets[0].position)
            }
        };

        let content = normalize(&raw);

        let roadmap = Roadmap {
            id: Uuid::new_v4(),
            candidate_id,
            target_companies: targets
                .iter()
                .map(|t| TargetSnapshot {
                    company: t.company.clone(),
                    position: t.position.clone(),
                })
                .collect(),
            title: content.title,
            description: content.description,
            estimated_timeline_months: content.estimated_timeline_months,
            difficulty_score: content.difficulty_score,
            milestones: content.milestones,
            alternative_routes: content.alternative_routes,
            analysis: content.analysis,
            created_at: Utc::now(),
        };

        self.roadmaps.insert(&roadmap).await?;
        self.candidates
            .set_roadmap_reference(candidate_id, roadmap.id)
            .await?;

        info!(
            "Generated roadmap {} with {} milestones for candidate {}",
            roadmap.id,
            roadmap.milestones.len(),
            candidate_id
        );

        Ok(roadmap)
    }

    /// Deletes the candidate's roadmap and generates a fresh one.
    ///
    /// Delete-then-create is NOT transactional: if generation fails after
    /// the delete, the candidate is left without a roadmap until they
    /// re-invoke generation.
    pub async fn regenerate(&self, candidate_id: Uuid) -> Result<Roadmap, AppError> {
        self.roadmaps.delete_by_candidate(candidate_id).await?;
        self.generate(candidate_id).await
    }

    pub async fn get_by_id(&self, roadmap_id: Uuid) -> Result<Roadmap, AppError> {
        self.roadmaps
            .fetch(roadmap_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Roadmap {roadmap_id} not found")))
    }

    pub async fn get_by_candidate(&self, candidate_id: Uuid) -> Result<Roadmap, AppError> {
        self.roadmaps
            .fetch_by_candidate(candidate_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No roadmap found for this candidate".to_string())
            })
    }

    /// Toggles a milestone's completion flag, stamping `completion_date` on
    /// true and clearing it on false, then persists the whole document.
    ///
    /// Read-modify-write with no locking: concurrent calls against the same
    /// roadmap are last-write-wins at the store.
    pub async fn set_milestone_status(
        &self,
        roadmap_id: Uuid,
        selector: MilestoneSelector,
        completed: bool,
    ) -> Result<Roadmap, AppError> {
        let mut roadmap = self.get_by_id(roadmap_id).await?;

        let index = match selector {
            MilestoneSelector::Id(id) => roadmap
                .milestones
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Milestone {id} not found")))?,
            MilestoneSelector::Index(i) => {
                if i >= roadmap.milestones.len() {
                    return Err(AppError::NotFound(format!(
                        "Milestone index {i} is out of bounds"
                    )));
                }
                i
            }
        };

        let milestone = &mut roadmap.milestones[index];
        milestone.completed = completed;
        milestone.completion_date = if completed { Some(Utc::now()) } else { None };

        self.roadmaps.replace(&roadmap).await?;
        Ok(roadmap)
    }
}

/// Fixed deterministic roadmap used when the planner is unreachable or
/// unconfigured. Parameterized only by the target position name; already
/// schema-valid by construction but still run through the normalizer.
pub fn fallback_roadmap(position: &str) -> RawRoadmap {
    RawRoadmap(json!({
        "title": format!("{position} Preparation Roadmap"),
        "description": format!(
            "A standard preparation path toward a {position} role, generated without AI assistance."
        ),
        "estimatedTimelineMonths": 6,
        "difficultyScore": 5,
        "milestones": [
            {
                "title": format!("Strengthen core {position} skills"),
                "description": "Review the fundamentals the role is built on and close the most common gaps.",
                "type": "skill",
                "difficulty": "intermediate",
                "timeEstimate": {"amount": 6, "unit": "weeks"},
                "resources": [],
                "order": 1,
                "dependencies": []
            },
            {
                "title": "Build a portfolio project",
                "description": "Ship one substantial project that demonstrates the target role's day-to-day work.",
                "type": "project",
                "difficulty": "intermediate",
                "timeEstimate": {"amount": 2, "unit": "months"},
                "resources": [],
                "order": 2,
                "dependencies": []
            },
            {
                "title": "Polish your resume",
                "description": "Rewrite your resume around the portfolio project and the role's keywords.",
                "type": "other",
                "difficulty": "beginner",
                "timeEstimate": {"amount": 1, "unit": "weeks"},
                "resources": [],
                "order": 3,
                "dependencies": []
            },
            {
                "title": "Prepare for interviews",
                "description": "Practice interview questions and mock interviews for the target position.",
                "type": "other",
                "difficulty": "intermediate",
                "timeEstimate": {"amount": 4, "unit": "weeks"},
                "resources": [],
                "order": 4,
                "dependencies": []
            }
        ],
        "alternativeRoutes": [],
        "gptAnalysis": {
            "reasoning": "Deterministic fallback plan used because the planning service was unavailable.",
            "keyInsights": [],
            "marketTrends": [],
            "companyCulture": []
        }
    }))
}
