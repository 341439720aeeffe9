//! Store boundary — every collaborator this core reads or writes sits behind
//! one of these traits, injected into services at construction time.
//!
//! The candidate/resume and job-requirement stores belong to excluded
//! collaborators; only their Postgres adapters live here. The roadmap store
//! is owned by this core.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::requirement::JobRequirementRow;
use crate::models::roadmap::Roadmap;
use crate::models::user::User;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Whatever free-form analysis object the resume-parsing collaborator
    /// produced for this candidate. Schema not enforced by this core.
    async fn get_resume_analysis(&self, candidate_id: Uuid) -> Result<Option<Value>, AppError>;

    async fn set_roadmap_reference(
        &self,
        candidate_id: Uuid,
        roadmap_id: Uuid,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait JobRequirementStore: Send + Sync {
    /// Case-insensitive partial match on both fields. Used only as optional
    /// planning context; an empty result is not an error.
    async fn find_by_company_and_position(
        &self,
        company: &str,
        position: &str,
    ) -> Result<Vec<JobRequirementRow>, AppError>;
}

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    async fn insert(&self, roadmap: &Roadmap) -> Result<(), AppError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Roadmap>, AppError>;

    async fn fetch_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Roadmap>, AppError>;

    /// Whole-document replacement keyed by `roadmap.id`. No version check —
    /// concurrent writers race and the last one wins. `created_at` is never
    /// touched by a replacement.
    async fn replace(&self, roadmap: &Roadmap) -> Result<(), AppError>;

    /// Tolerates absence: deleting a candidate with no roadmap is a no-op.
    async fn delete_by_candidate(&self, candidate_id: Uuid) -> Result<(), AppError>;
}
