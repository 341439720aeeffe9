//! Compatibility Scorer — measures a candidate profile against a recruiter's
//! job requirements.
//!
//! Default backend delegates to the LLM and does not retry; every failure
//! maps to `AppError::ExternalService`. The caller decides whether to
//! recover with `heuristic_compatibility` (the handler does) or surface the
//! error.
//!
//! Carried in `AppState` as `Arc<dyn CompatibilityScorer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{COMPATIBILITY_PROMPT_TEMPLATE, COMPATIBILITY_SYSTEM};
use crate::models::requirement::JobRequirements;
use crate::models::roadmap::Milestone;

// ────────────────────────────────────────────────────────────────────────────
// Data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Candidate-side input to compatibility scoring, assembled by the handler
/// from the resume analysis and current roadmap state.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub resume_analysis: Value,
    pub milestones: Vec<Milestone>,
    pub completed_milestones: Vec<Milestone>,
}

/// Full compatibility report returned to callers. Deserialized from
/// untrusted LLM output, so every list/optional field is defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub match_score: u32, // 0 – 100
    #[serde(default)]
    pub matching_strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub estimated_time_to_close: Option<TimeToClose>,
    #[serde(default)]
    pub analysis: String,
    /// "llm" | "heuristic" — for transparency
    #[serde(default)]
    pub scorer_backend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeToClose {
    pub amount: f64,
    pub unit: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CompatibilityScorer: Send + Sync {
    async fn score(
        &self,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
    ) -> Result<CompatibilityReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmCompatibilityScorer — default backend
// ────────────────────────────────────────────────────────────────────────────

/// Semantic scorer via the shared LLM client. One call, no scorer-level
/// retry.
pub struct LlmCompatibilityScorer(pub LlmClient);

#[async_trait]
impl CompatibilityScorer for LlmCompatibilityScorer {
    async fn score(
        &self,
        profile: &CandidateProfile,
        requirements: &JobRequirements,
    ) -> Result<CompatibilityReport, AppError> {
        let prompt = build_compatibility_prompt(profile, requirements)?;
        let mut report: CompatibilityReport = self
            .0
            .call_json(&prompt, COMPATIBILITY_SYSTEM)
            .await
            .map_err(|e| AppError::ExternalService(format!("Compatibility scoring failed: {e}")))?;
        report.match_score = report.match_score.min(100);
        report.scorer_backend = "llm".to_string();
        Ok(report)
    }
}

fn build_compatibility_prompt(
    profile: &CandidateProfile,
    requirements: &JobRequirements,
) -> Result<String, AppError> {
    let profile_json = serde_json::to_string(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;
    let requirements_json = serde_json::to_string(requirements).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize requirements: {e}"))
    })?;
    Ok(COMPATIBILITY_PROMPT_TEMPLATE
        .replace("{candidate_profile}", &profile_json)
        .replace("{job_requirements}", &requirements_json))
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic fallback
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic fallback scorer: case-insensitive substring overlap of
/// candidate skill names against the required skill names, scored as the
/// percentage of required skills matched.
pub fn heuristic_compatibility(
    profile: &CandidateProfile,
    requirements: &JobRequirements,
) -> CompatibilityReport {
    let required: Vec<&str> = requirements
        .required_skills
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    if required.is_empty() {
        return CompatibilityReport {
            match_score: 0,
            matching_strengths: vec![],
            gaps: vec![],
            recommendations: vec![],
            estimated_time_to_close: None,
            analysis: "No required skills listed — cannot score compatibility.".to_string(),
            scorer_backend: "heuristic".to_string(),
        };
    }

    let candidate_skills: Vec<String> =
        profile.skills.iter().map(|s| s.to_lowercase()).collect();

    let mut matching_strengths = Vec::new();
    let mut gaps = Vec::new();

    for name in &required {
        let needle = name.to_lowercase();
        let covered = candidate_skills
            .iter()
            .any(|skill| skill.contains(&needle) || needle.contains(skill.as_str()));
        if covered {
            matching_strengths.push(name.to_string());
        } else {
            gaps.push(name.to_string());
        }
    }

    let match_score =
        (matching_strengths.len() as f64 / required.len() as f64 * 100.0).round() as u32;

    let recommendations = if gaps.is_empty() {
        vec![]
    } else {
        vec![format!(
            "Build demonstrable experience with: {}",
            gaps.join(", ")
        )]
    };

    CompatibilityReport {
        match_score,
        analysis: format!(
            "Skill-overlap estimate: {} of {} required skills matched.",
            matching_strengths.len(),
            required.len()
        ),
        matching_strengths,
        gaps,
        recommendations,
        estimated_time_to_close: None,
        scorer_backend: "heuristic".to_string(),
    }
}

/// Pulls a flat skill list out of the free-form resume analysis. The
/// analysis schema is not enforced, so both common spellings are read.
pub fn extract_skills(resume_analysis: &Value) -> Vec<String> {
    let mut skills = Vec::new();
    for key in ["keySkills", "skills"] {
        if let Some(items) = resume_analysis.get(key).and_then(Value::as_array) {
            for item in items.iter().filter_map(Value::as_str) {
                if !skills.iter().any(|s: &String| s.eq_ignore_ascii_case(item)) {
                    skills.push(item.to_string());
                }
            }
        }
    }
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requirement::SkillRequirement;
    use serde_json::json;

    fn profile_with_skills(skills: Vec<&str>) -> CandidateProfile {
        CandidateProfile {
            skills: skills.into_iter().map(str::to_string).collect(),
            resume_analysis: json!({}),
            milestones: vec![],
            completed_milestones: vec![],
        }
    }

    fn requirements_with(names: Vec<&str>) -> JobRequirements {
        JobRequirements {
            required_skills: names
                .into_iter()
                .map(|n| SkillRequirement {
                    name: n.to_string(),
                    level: None,
                    required: true,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_overlap_scores_100() {
        let report = heuristic_compatibility(
            &profile_with_skills(vec!["Rust", "PostgreSQL"]),
            &requirements_with(vec!["rust", "postgresql"]),
        );
        assert_eq!(report.match_score, 100);
        assert_eq!(report.matching_strengths.len(), 2);
        assert!(report.gaps.is_empty());
        assert_eq!(report.scorer_backend, "heuristic");
    }

    #[test]
    fn test_partial_overlap_scores_percentage() {
        let report = heuristic_compatibility(
            &profile_with_skills(vec!["JavaScript"]),
            &requirements_with(vec!["JavaScript", "Go", "Kubernetes"]),
        );
        assert_eq!(report.match_score, 33);
        assert_eq!(report.gaps, vec!["Go", "Kubernetes"]);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("Kubernetes"));
    }

    #[test]
    fn test_substring_match_counts() {
        // "React" covers a "React.js" requirement and vice versa.
        let report = heuristic_compatibility(
            &profile_with_skills(vec!["React.js"]),
            &requirements_with(vec!["React"]),
        );
        assert_eq!(report.match_score, 100);
    }

    #[test]
    fn test_no_required_skills_scores_zero() {
        let report = heuristic_compatibility(
            &profile_with_skills(vec!["Rust"]),
            &JobRequirements::default(),
        );
        assert_eq!(report.match_score, 0);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_extract_skills_reads_both_keys_and_dedups() {
        let analysis = json!({
            "keySkills": ["Rust", "SQL"],
            "skills": ["rust", "Terraform"],
            "strengths": ["ignored"]
        });
        let skills = extract_skills(&analysis);
        assert_eq!(skills, vec!["Rust", "SQL", "Terraform"]);
    }

    #[test]
    fn test_extract_skills_tolerates_missing_or_wrong_types() {
        assert!(extract_skills(&json!({})).is_empty());
        assert!(extract_skills(&json!({"skills": "Rust"})).is_empty());
        assert!(extract_skills(&json!(null)).is_empty());
    }

    #[test]
    fn test_report_deserializes_from_sparse_llm_output() {
        let json = r#"{"match_score": 72, "gaps": ["Kafka"]}"#;
        let report: CompatibilityReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.match_score, 72);
        assert_eq!(report.gaps, vec!["Kafka"]);
        assert!(report.matching_strengths.is_empty());
        assert!(report.estimated_time_to_close.is_none());
        assert_eq!(report.scorer_backend, "");
    }

    #[test]
    fn test_prompt_embeds_profile_and_requirements() {
        let prompt = build_compatibility_prompt(
            &profile_with_skills(vec!["Rust"]),
            &requirements_with(vec!["Kubernetes"]),
        )
        .unwrap();
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("Kubernetes"));
        assert!(!prompt.contains("{candidate_profile}"));
    }
}
