// All LLM prompt constants for the matching module.

/// System prompt for compatibility scoring — enforces JSON-only output.
pub const COMPATIBILITY_SYSTEM: &str = "You are an expert talent evaluator specializing in \
    matching candidates to tech industry positions. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Compatibility scoring prompt template.
/// Replace: {candidate_profile}, {job_requirements}
pub const COMPATIBILITY_PROMPT_TEMPLATE: &str = r#"Compare this candidate's profile with the job requirements and provide a match analysis.

Candidate profile: {candidate_profile}
Job requirements: {job_requirements}

Assess the overall match, the strengths that line up with the requirements, where the candidate falls short, how to improve the match, and how long closing the gaps would take.

Return a JSON object with this EXACT schema:
{
  "match_score": 75,
  "matching_strengths": ["strength"],
  "gaps": ["gap"],
  "recommendations": ["recommendation"],
  "estimated_time_to_close": {"amount": 3, "unit": "weeks|months|years"},
  "analysis": "detailed analysis as a string"
}"#;

/// System prompt for JD analysis — enforces JSON-only output.
pub const JD_ANALYSIS_SYSTEM: &str = "You are an expert at analyzing job descriptions and \
    extracting structured requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD analysis prompt template. Replace `{jd_text}` before sending.
pub const JD_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job description for a software engineering position and extract key requirements and preferences: required and preferred technical skills, experience level, education, key responsibilities, and company culture indicators.

Return a JSON object with this EXACT schema:
{
  "required_skills": [
    {"name": "skill name", "level": "beginner|intermediate|advanced|expert", "required": true}
  ],
  "preferred_skills": [
    {"name": "skill name", "level": "beginner|intermediate|advanced|expert", "required": false}
  ],
  "experience_required": {"min": 2, "max": 5},
  "education_requirements": [
    {"degree": "degree type", "field": "field of study", "required": false}
  ],
  "responsibilities": ["responsibility"],
  "company_culture": ["culture note"]
}

JOB DESCRIPTION:
{jd_text}"#;
