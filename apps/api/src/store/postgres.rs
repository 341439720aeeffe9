//! Postgres adapters for the store traits.
//!
//! A roadmap is one row; `target_companies`, `milestones`,
//! `alternative_routes`, and `analysis` are JSONB columns, so every write is
//! a whole-document replacement of the embedded collections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::requirement::JobRequirementRow;
use crate::models::roadmap::{AlternativeRoute, Milestone, PlannerAnalysis, Roadmap, TargetSnapshot};
use crate::models::user::{CandidateRole, RecruiterRole, Role, TargetCompany, User};
use crate::store::{CandidateStore, JobRequirementStore, RoadmapStore};

// ────────────────────────────────────────────────────────────────────────────
// Candidate store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    name: String,
    kind: String,
    company: Option<String>,
    target_companies: Option<Json<Vec<TargetCompany>>>,
    roadmap_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn into_user(self) -> Result<User, AppError> {
        let role = match self.kind.as_str() {
            "candidate" => Role::Candidate(CandidateRole {
                target_companies: self.target_companies.map(|j| j.0).unwrap_or_default(),
                roadmap_id: self.roadmap_id,
            }),
            "recruiter" => Role::Recruiter(RecruiterRole {
                company: self.company.unwrap_or_default(),
            }),
            other => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "Unknown user kind '{other}' for user {}",
                    self.id
                )))
            }
        };
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
            role,
        })
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let record: Option<UserRecord> = sqlx::query_as(
            "SELECT id, email, name, kind, company, target_companies, roadmap_id, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(UserRecord::into_user).transpose()
    }

    async fn get_resume_analysis(&self, candidate_id: Uuid) -> Result<Option<Value>, AppError> {
        let analysis: Option<Value> =
            sqlx::query_scalar("SELECT analysis FROM resumes WHERE candidate_id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(analysis)
    }

    async fn set_roadmap_reference(
        &self,
        candidate_id: Uuid,
        roadmap_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET roadmap_id = $2 WHERE id = $1 AND kind = 'candidate'")
            .bind(candidate_id)
            .bind(roadmap_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job requirement store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgJobRequirementStore {
    pool: PgPool,
}

impl PgJobRequirementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRequirementStore for PgJobRequirementStore {
    async fn find_by_company_and_position(
        &self,
        company: &str,
        position: &str,
    ) -> Result<Vec<JobRequirementRow>, AppError> {
        let rows: Vec<JobRequirementRow> = sqlx::query_as(
            "SELECT id, recruiter_id, company, position, requirements, created_at
             FROM job_requirements
             WHERE company ILIKE $1 AND position ILIKE $2",
        )
        .bind(format!("%{company}%"))
        .bind(format!("%{position}%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Roadmap store
// ────────────────────────────────────────────────────────────────────────────

pub struct PgRoadmapStore {
    pool: PgPool,
}

impl PgRoadmapStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RoadmapRecord {
    id: Uuid,
    candidate_id: Uuid,
    target_companies: Json<Vec<TargetSnapshot>>,
    title: String,
    description: String,
    estimated_timeline_months: i32,
    difficulty_score: i32,
    milestones: Json<Vec<Milestone>>,
    alternative_routes: Json<Vec<AlternativeRoute>>,
    analysis: Json<PlannerAnalysis>,
    created_at: DateTime<Utc>,
}

impl From<RoadmapRecord> for Roadmap {
    fn from(r: RoadmapRecord) -> Self {
        Roadmap {
            id: r.id,
            candidate_id: r.candidate_id,
            target_companies: r.target_companies.0,
            title: r.title,
            description: r.description,
            estimated_timeline_months: r.estimated_timeline_months,
            difficulty_score: r.difficulty_score,
            milestones: r.milestones.0,
            alternative_routes: r.alternative_routes.0,
            analysis: r.analysis.0,
            created_at: r.created_at,
        }
    }
}

const ROADMAP_COLUMNS: &str = "id, candidate_id, target_companies, title, description, \
     estimated_timeline_months, difficulty_score, milestones, alternative_routes, \
     analysis, created_at";

#[async_trait]
impl RoadmapStore for PgRoadmapStore {
    async fn insert(&self, roadmap: &Roadmap) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO roadmaps
                (id, candidate_id, target_companies, title, description,
                 estimated_timeline_months, difficulty_score, milestones,
                 alternative_routes, analysis, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(roadmap.id)
        .bind(roadmap.candidate_id)
        .bind(Json(&roadmap.target_companies))
        .bind(&roadmap.title)
        .bind(&roadmap.description)
        .bind(roadmap.estimated_timeline_months)
        .bind(roadmap.difficulty_score)
        .bind(Json(&roadmap.milestones))
        .bind(Json(&roadmap.alternative_routes))
        .bind(Json(&roadmap.analysis))
        .bind(roadmap.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Roadmap>, AppError> {
        let record: Option<RoadmapRecord> =
            sqlx::query_as(&format!("SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(record.map(Roadmap::from))
    }

    async fn fetch_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Roadmap>, AppError> {
        let record: Option<RoadmapRecord> = sqlx::query_as(&format!(
            "SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE candidate_id = $1"
        ))
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record.map(Roadmap::from))
    }

    async fn replace(&self, roadmap: &Roadmap) -> Result<(), AppError> {
        // created_at is deliberately absent: the timeline origin never moves
        // on a field edit, only on regeneration.
        sqlx::query(
            "UPDATE roadmaps SET
                target_companies = $2,
                title = $3,
                description = $4,
                estimated_timeline_months = $5,
                difficulty_score = $6,
                milestones = $7,
                alternative_routes = $8,
                analysis = $9
             WHERE id = $1",
        )
        .bind(roadmap.id)
        .bind(Json(&roadmap.target_companies))
        .bind(&roadmap.title)
        .bind(&roadmap.description)
        .bind(roadmap.estimated_timeline_months)
        .bind(roadmap.difficulty_score)
        .bind(Json(&roadmap.milestones))
        .bind(Json(&roadmap.alternative_routes))
        .bind(Json(&roadmap.analysis))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_by_candidate(&self, candidate_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM roadmaps WHERE candidate_id = $1")
            .bind(candidate_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
