//! JD Analysis — extracts structured requirements from a raw job description.

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{JD_ANALYSIS_PROMPT_TEMPLATE, JD_ANALYSIS_SYSTEM};
use crate::models::requirement::JobRequirements;

/// Analyzes a job description with the LLM and returns the loose-typed
/// requirements structure. No fallback: failures surface to the caller.
pub async fn analyze_job_description(
    jd_text: &str,
    llm: &LlmClient,
) -> Result<JobRequirements, AppError> {
    let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    llm.call_json::<JobRequirements>(&prompt, JD_ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::ExternalService(format!("JD analysis failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_analysis_response_deserializes() {
        let json = r#"{
            "required_skills": [
                {"name": "Rust", "level": "advanced", "required": true}
            ],
            "preferred_skills": [
                {"name": "Kubernetes", "level": "intermediate", "required": false}
            ],
            "experience_required": {"min": 3, "max": 6},
            "education_requirements": [
                {"degree": "BSc", "field": "Computer Science", "required": false}
            ],
            "responsibilities": ["Own the storage layer"],
            "company_culture": ["Remote-first"]
        }"#;

        let reqs: JobRequirements = serde_json::from_str(json).unwrap();
        assert_eq!(reqs.required_skills[0].name, "Rust");
        assert!(reqs.required_skills[0].required);
        assert_eq!(reqs.preferred_skills[0].name, "Kubernetes");
        assert_eq!(reqs.experience_required.unwrap().min, Some(3.0));
        assert_eq!(reqs.responsibilities.len(), 1);
    }

    #[test]
    fn test_prompt_template_substitutes_jd_text() {
        let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", "Senior Rust Engineer");
        assert!(prompt.contains("Senior Rust Engineer"));
        assert!(!prompt.contains("{jd_text}"));
    }
}
