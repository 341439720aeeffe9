use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate's career roadmap. Stored as one document: the embedded
/// collections live in JSONB columns and every write replaces them wholesale.
///
/// `created_at` fixes the origin of the planned timeline. It is never
/// updated after creation; only a full regeneration (delete + recreate)
/// moves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: Uuid,
    pub candidate_id: Uuid,
    /// Snapshot of the candidate's targets at generation time. An
    /// independent copy: later edits to the candidate's target list do not
    /// retroactively alter this roadmap.
    pub target_companies: Vec<TargetSnapshot>,
    pub title: String,
    pub description: String,
    pub estimated_timeline_months: i32,
    pub difficulty_score: i32,
    pub milestones: Vec<Milestone>,
    /// Informational only. Never scored or mutated post-creation.
    pub alternative_routes: Vec<AlternativeRoute>,
    pub analysis: PlannerAnalysis,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub company: String,
    pub position: String,
}

/// A single actionable step in a roadmap. Embedded in its parent document;
/// no lifecycle or identity outside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Stable identifier assigned at normalization time. Mutations may be
    /// keyed by this id instead of the (fragile) positional index.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub kind: MilestoneKind,
    pub difficulty: Difficulty,
    pub time_estimate: TimeEstimate,
    pub resources: Vec<Resource>,
    /// Intended sequence hint. Not required to be contiguous or unique;
    /// sort by it best-effort, never enforce it.
    pub order: i64,
    pub completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub dependencies: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Project,
    Certification,
    Course,
    Skill,
    Job,
    Internship,
    Networking,
    Education,
    Other,
}

impl MilestoneKind {
    /// True for milestone kinds that count toward the skill-improvement
    /// sub-score.
    pub fn is_skill_building(self) -> bool {
        matches!(
            self,
            MilestoneKind::Skill | MilestoneKind::Course | MilestoneKind::Certification
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub amount: i64,
    pub unit: TimeUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
    Course,
    Book,
    Documentation,
    Tool,
    Other,
}

/// A named alternative milestone sequence. Informational; carries only the
/// light milestone shape (no scheduling or completion state).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeRoute {
    pub title: String,
    pub description: String,
    pub milestones: Vec<RouteMilestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteMilestone {
    pub title: String,
    pub description: String,
    pub kind: MilestoneKind,
}

/// Free-text reasoning bundle authored by the planner. Informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerAnalysis {
    pub reasoning: String,
    pub key_insights: Vec<String>,
    pub market_trends: Vec<String>,
    pub company_culture: Vec<String>,
}
