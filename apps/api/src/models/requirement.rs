use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A recruiter's stored requirements for one (company, position). The
/// `requirements` payload is the loose output of JD analysis; its schema is
/// not enforced here — it is only forwarded as planning context.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRequirementRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub company: String,
    pub position: String,
    pub requirements: Value,
    pub created_at: DateTime<Utc>,
}

/// Structured JD analysis output. Untrusted LLM output: every field is
/// defaulted so a sparse or partly off-schema response still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub preferred_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub experience_required: Option<ExperienceRange>,
    #[serde(default)]
    pub education_requirements: Vec<EducationRequirement>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub company_culture: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRequirement {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub required: bool,
}
