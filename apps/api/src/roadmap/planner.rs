//! Planner boundary — the external generative capability that authors
//! roadmap content from a candidate's resume analysis and targets.
//!
//! Carried in the service as `Arc<dyn RoadmapPlanner>` so tests can swap in
//! canned or failing planners without a network.

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::prompts::SCHEMA_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::requirement::JobRequirementRow;
use crate::models::user::TargetCompany;
use crate::roadmap::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};

/// Untrusted planner output. A thin wrapper over the raw JSON so it cannot
/// enter domain logic by accident: the only consumer is the normalizer.
#[derive(Debug, Clone)]
pub struct RawRoadmap(pub Value);

#[async_trait]
pub trait RoadmapPlanner: Send + Sync {
    /// Drafts a roadmap. Stateless per call: identical inputs are neither
    /// cached nor deduplicated, and concurrent drafts for one candidate are
    /// not serialized.
    async fn draft(
        &self,
        resume_analysis: &Value,
        targets: &[TargetCompany],
        requirements: &[JobRequirementRow],
    ) -> Result<RawRoadmap, LlmError>;
}

/// Production planner backed by the shared LLM client.
pub struct LlmRoadmapPlanner(pub LlmClient);

#[async_trait]
impl RoadmapPlanner for LlmRoadmapPlanner {
    async fn draft(
        &self,
        resume_analysis: &Value,
        targets: &[TargetCompany],
        requirements: &[JobRequirementRow],
    ) -> Result<RawRoadmap, LlmError> {
        let prompt = build_roadmap_prompt(resume_analysis, targets, requirements)?;
        let value: Value = self.0.call_json(&prompt, ROADMAP_SYSTEM).await?;
        Ok(RawRoadmap(value))
    }
}

fn build_roadmap_prompt(
    resume_analysis: &Value,
    targets: &[TargetCompany],
    requirements: &[JobRequirementRow],
) -> Result<String, LlmError> {
    let requirements_section = if requirements.is_empty() {
        String::new()
    } else {
        let payloads: Vec<&Value> = requirements.iter().map(|r| &r.requirements).collect();
        format!(
            "Job requirements from recruiters at the target companies:\n{}\n",
            serde_json::to_string(&payloads)?
        )
    };

    Ok(ROADMAP_PROMPT_TEMPLATE
        .replace("{schema_instruction}", SCHEMA_INSTRUCTION)
        .replace("{resume_analysis}", &serde_json::to_string(resume_analysis)?)
        .replace("{targets}", &serde_json::to_string(targets)?)
        .replace("{requirements_section}", &requirements_section))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_prompt_includes_targets_and_analysis() {
        let analysis = serde_json::json!({"strengths": ["Rust"], "skillGaps": ["Kubernetes"]});
        let targets = vec![TargetCompany {
            company: "Acme".to_string(),
            position: "Backend Engineer".to_string(),
            priority: 1,
        }];
        let prompt = build_roadmap_prompt(&analysis, &targets, &[]).unwrap();
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("Kubernetes"));
        assert!(!prompt.contains("{targets}"));
        assert!(!prompt.contains("{requirements_section}"));
    }

    #[test]
    fn test_prompt_omits_requirements_section_when_empty() {
        let prompt = build_roadmap_prompt(&serde_json::json!({}), &[], &[]).unwrap();
        assert!(!prompt.contains("requirements from recruiters"));
    }

    #[test]
    fn test_prompt_embeds_recruiter_requirements() {
        let row = JobRequirementRow {
            id: Uuid::new_v4(),
            recruiter_id: Uuid::new_v4(),
            company: "Acme".to_string(),
            position: "Backend Engineer".to_string(),
            requirements: serde_json::json!({"required_skills": [{"name": "Go"}]}),
            created_at: Utc::now(),
        };
        let prompt = build_roadmap_prompt(&serde_json::json!({}), &[], &[row]).unwrap();
        assert!(prompt.contains("requirements from recruiters"));
        assert!(prompt.contains("\"Go\""));
    }
}
