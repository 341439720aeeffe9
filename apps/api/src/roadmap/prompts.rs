// All LLM prompt constants for the roadmap module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for roadmap drafting — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str = "You are an expert career coach specializing in creating \
    detailed roadmaps for tech professionals. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Roadmap drafting prompt template.
/// Replace: {schema_instruction}, {resume_analysis}, {targets}, {requirements_section}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a detailed career roadmap for a candidate based on their resume analysis and target companies.

Resume analysis: {resume_analysis}
Target companies and positions: {targets}
{requirements_section}
Generate a career roadmap that makes this candidate competitive for their target positions. Cover projects to build, skills to learn, certifications to obtain, networking opportunities, and other relevant activities, in the order they should be tackled.

{schema_instruction}

Return a JSON object with this EXACT schema:
{
  "title": "Roadmap title",
  "description": "Brief description",
  "estimatedTimelineMonths": 6,
  "difficultyScore": 5,
  "milestones": [
    {
      "title": "Milestone title",
      "description": "Detailed description",
      "type": "project|certification|course|skill|job|internship|networking|education|other",
      "difficulty": "beginner|intermediate|advanced|expert",
      "timeEstimate": {"amount": 2, "unit": "days|weeks|months"},
      "resources": [
        {"title": "Resource title", "url": "https://example.com", "type": "article|video|course|book|documentation|tool|other"}
      ],
      "order": 1,
      "dependencies": []
    }
  ],
  "alternativeRoutes": [
    {"title": "Alternative route title", "description": "Description", "milestones": []}
  ],
  "gptAnalysis": {
    "reasoning": "Detailed explanation",
    "keyInsights": ["insight"],
    "marketTrends": ["trend"],
    "companyCulture": ["culture note"]
  }
}"#;

/// System prompt for target-company recommendations.
pub const RECOMMENDATIONS_SYSTEM: &str = "You are a career coach specializing in tech careers. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Target-company recommendations prompt template.
/// Replace: {company}, {position}
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"Generate specific recommendations for a candidate targeting {company} for a {position} position.

Based on the company culture and typical job requirements, what specific actions should the candidate prioritize in their roadmap?

Provide 3-5 specific recommendations with brief explanations. Return a JSON object:
{
  "recommendations": [
    {"recommendation": "Short action", "explanation": "Why it matters for this company"}
  ]
}"#;
