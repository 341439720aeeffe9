//! Milestone Normalizer — the validation boundary between untrusted planner
//! output and the canonical roadmap schema.
//!
//! `normalize` is total: whatever JSON the planner produced (empty object,
//! null fields, wrong-typed fields, extra keys), the result satisfies every
//! enum and range constraint of the schema. Invalid or missing fields are
//! replaced with defaults, never rejected.

use serde_json::Value;
use uuid::Uuid;

use crate::models::roadmap::{
    AlternativeRoute, Difficulty, Milestone, MilestoneKind, PlannerAnalysis, Resource,
    ResourceKind, RouteMilestone, TimeEstimate, TimeUnit,
};
use crate::roadmap::planner::RawRoadmap;

const DEFAULT_TITLE: &str = "Career Roadmap";
const DEFAULT_TIMELINE_MONTHS: i32 = 6;
const DEFAULT_DIFFICULTY_SCORE: i32 = 5;
const DEFAULT_MILESTONE_DESCRIPTION: &str = "No description provided.";

/// Canonical roadmap content, ready to be wrapped into a persisted document.
/// Identity, ownership, and the timeline origin are assigned by the caller.
#[derive(Debug, Clone)]
pub struct RoadmapContent {
    pub title: String,
    pub description: String,
    pub estimated_timeline_months: i32,
    pub difficulty_score: i32,
    pub milestones: Vec<Milestone>,
    pub alternative_routes: Vec<AlternativeRoute>,
    pub analysis: PlannerAnalysis,
}

/// Coerces an untrusted roadmap payload into the canonical schema.
/// Reads the input without mutating it; the caller's payload is untouched.
pub fn normalize(raw: &RawRoadmap) -> RoadmapContent {
    let doc = &raw.0;

    let milestones = doc
        .get("milestones")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, m)| normalize_milestone(m, i))
                .collect()
        })
        .unwrap_or_default();

    let alternative_routes = doc
        .get("alternativeRoutes")
        .and_then(Value::as_array)
        .map(|routes| routes.iter().map(normalize_route).collect())
        .unwrap_or_default();

    RoadmapContent {
        title: non_empty_string(doc.get("title"))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: string_or_empty(doc.get("description")),
        estimated_timeline_months: doc
            .get("estimatedTimelineMonths")
            .and_then(Value::as_i64)
            .filter(|m| *m > 0)
            .map(|m| m.min(i32::MAX as i64) as i32)
            .unwrap_or(DEFAULT_TIMELINE_MONTHS),
        difficulty_score: doc
            .get("difficultyScore")
            .and_then(Value::as_i64)
            .map(|d| d.clamp(1, 10) as i32)
            .unwrap_or(DEFAULT_DIFFICULTY_SCORE),
        milestones,
        alternative_routes,
        analysis: normalize_analysis(doc.get("gptAnalysis")),
    }
}

fn normalize_milestone(m: &Value, index: usize) -> Milestone {
    Milestone {
        // Stable id minted here, before first persistence, so mutations can
        // address the milestone without relying on list position.
        id: Uuid::new_v4(),
        title: non_empty_string(m.get("title"))
            .unwrap_or_else(|| format!("Milestone {}", index + 1)),
        description: non_empty_string(m.get("description"))
            .unwrap_or_else(|| DEFAULT_MILESTONE_DESCRIPTION.to_string()),
        kind: parse_milestone_kind(m.get("type")).unwrap_or(MilestoneKind::Other),
        difficulty: parse_difficulty(m.get("difficulty")).unwrap_or(Difficulty::Intermediate),
        time_estimate: normalize_time_estimate(m.get("timeEstimate")),
        resources: m
            .get("resources")
            .and_then(Value::as_array)
            .map(|rs| rs.iter().map(normalize_resource).collect())
            .unwrap_or_default(),
        order: m
            .get("order")
            .and_then(Value::as_i64)
            .unwrap_or(index as i64),
        completed: false,
        completion_date: None,
        // Always emptied: planner output references milestones by index, but
        // canonical dependencies are ids, which do not exist in the payload.
        dependencies: Vec::new(),
    }
}

/// Synonym table is a case-sensitive exact match ("Year" is not recognized
/// and falls through to the default estimate).
fn normalize_time_estimate(v: Option<&Value>) -> TimeEstimate {
    let default = TimeEstimate {
        amount: 2,
        unit: TimeUnit::Weeks,
    };

    let Some(estimate) = v else { return default };
    let Some(amount) = estimate.get("amount").and_then(Value::as_i64).filter(|a| *a > 0) else {
        return default;
    };

    match estimate.get("unit").and_then(Value::as_str) {
        Some("day") | Some("days") => TimeEstimate {
            amount,
            unit: TimeUnit::Days,
        },
        Some("week") | Some("weeks") => TimeEstimate {
            amount,
            unit: TimeUnit::Weeks,
        },
        Some("month") | Some("months") => TimeEstimate {
            amount,
            unit: TimeUnit::Months,
        },
        Some("year") | Some("years") => TimeEstimate {
            amount: amount.saturating_mul(12),
            unit: TimeUnit::Months,
        },
        _ => default,
    }
}

fn normalize_resource(r: &Value) -> Resource {
    Resource {
        title: string_or_empty(r.get("title")),
        url: string_or_empty(r.get("url")),
        kind: parse_resource_kind(r.get("type")).unwrap_or(ResourceKind::Other),
    }
}

fn normalize_route(route: &Value) -> AlternativeRoute {
    AlternativeRoute {
        title: string_or_empty(route.get("title")),
        description: string_or_empty(route.get("description")),
        milestones: route
            .get("milestones")
            .and_then(Value::as_array)
            .map(|ms| {
                ms.iter()
                    .map(|m| RouteMilestone {
                        title: string_or_empty(m.get("title")),
                        description: string_or_empty(m.get("description")),
                        kind: parse_milestone_kind(m.get("type")).unwrap_or(MilestoneKind::Other),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn normalize_analysis(v: Option<&Value>) -> PlannerAnalysis {
    let Some(analysis) = v else {
        return PlannerAnalysis::default();
    };
    PlannerAnalysis {
        reasoning: string_or_empty(analysis.get("reasoning")),
        key_insights: string_list(analysis.get("keyInsights")),
        market_trends: string_list(analysis.get("marketTrends")),
        company_culture: string_list(analysis.get("companyCulture")),
    }
}

fn parse_milestone_kind(v: Option<&Value>) -> Option<MilestoneKind> {
    match v?.as_str()?.to_lowercase().as_str() {
        "project" => Some(MilestoneKind::Project),
        "certification" => Some(MilestoneKind::Certification),
        "course" => Some(MilestoneKind::Course),
        "skill" => Some(MilestoneKind::Skill),
        "job" => Some(MilestoneKind::Job),
        "internship" => Some(MilestoneKind::Internship),
        "networking" => Some(MilestoneKind::Networking),
        "education" => Some(MilestoneKind::Education),
        "other" => Some(MilestoneKind::Other),
        _ => None,
    }
}

fn parse_difficulty(v: Option<&Value>) -> Option<Difficulty> {
    match v?.as_str()?.to_lowercase().as_str() {
        "beginner" => Some(Difficulty::Beginner),
        "intermediate" => Some(Difficulty::Intermediate),
        "advanced" => Some(Difficulty::Advanced),
        "expert" => Some(Difficulty::Expert),
        _ => None,
    }
}

fn parse_resource_kind(v: Option<&Value>) -> Option<ResourceKind> {
    match v?.as_str()?.to_lowercase().as_str() {
        "article" => Some(ResourceKind::Article),
        "video" => Some(ResourceKind::Video),
        "course" => Some(ResourceKind::Course),
        "book" => Some(ResourceKind::Book),
        "documentation" => Some(ResourceKind::Documentation),
        "tool" => Some(ResourceKind::Tool),
        "other" => Some(ResourceKind::Other),
        _ => None,
    }
}

fn non_empty_string(v: Option<&Value>) -> Option<String> {
    v?.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_or_empty(v: Option<&Value>) -> String {
    v.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn string_list(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
