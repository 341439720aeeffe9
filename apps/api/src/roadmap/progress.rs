//! Progress Scorer — pure derivations over one roadmap snapshot.
//!
//! No caching: every request recomputes from the document. `now` is a
//! parameter so the arithmetic is testable at fixed instants.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use crate::models::roadmap::Roadmap;

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub completion_percentage: u32,
    pub time_progress: u32,
    pub is_on_track: bool,
    pub remaining_time: RemainingTime,
    pub skill_improvement_score: u32,
    pub completed_milestones: usize,
    pub total_milestones: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemainingTime {
    pub days: i64,
    pub months: i64,
}

/// Scores completion, pacing, and skill progress for a roadmap.
/// Total for any structurally valid roadmap: an empty milestone list scores
/// 0 on every percentage rather than dividing by zero.
pub fn score_progress(roadmap: &Roadmap, now: DateTime<Utc>) -> ProgressReport {
    let total_milestones = roadmap.milestones.len();
    let completed_milestones = roadmap.milestones.iter().filter(|m| m.completed).count();

    let completion_percentage = if total_milestones > 0 {
        completed_milestones as f64 / total_milestones as f64 * 100.0
    } else {
        0.0
    };

    let target_end = target_end_date(roadmap);
    let total_duration_ms = (target_end - roadmap.created_at).num_milliseconds();
    let elapsed_ms = (now - roadmap.created_at).num_milliseconds();
    let time_progress = if total_duration_ms > 0 {
        (elapsed_ms as f64 / total_duration_ms as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        // Degenerate timeline counts as fully elapsed.
        100.0
    };

    // Compared unrounded so a 49.7% pace does not beat 50% completion by a
    // rounding artifact.
    let is_on_track = completion_percentage >= time_progress;

    let remaining_ms = (target_end - now).num_milliseconds().max(0);
    let days = (remaining_ms as f64 / 86_400_000.0).ceil() as i64;
    let months = (days as f64 / 30.0).ceil() as i64;

    let skill_milestones: Vec<_> = roadmap
        .milestones
        .iter()
        .filter(|m| m.kind.is_skill_building())
        .collect();
    let skill_improvement_score = if skill_milestones.is_empty() {
        0.0
    } else {
        let completed = skill_milestones.iter().filter(|m| m.completed).count();
        completed as f64 / skill_milestones.len() as f64 * 100.0
    };

    ProgressReport {
        completion_percentage: completion_percentage.round() as u32,
        time_progress: time_progress.round() as u32,
        is_on_track,
        remaining_time: RemainingTime { days, months },
        skill_improvement_score: skill_improvement_score.round() as u32,
        completed_milestones,
        total_milestones,
    }
}

/// `created_at` plus the planned number of calendar months.
fn target_end_date(roadmap: &Roadmap) -> DateTime<Utc> {
    let months = roadmap.estimated_timeline_months.max(0) as u32;
    roadmap
        .created_at
        .checked_add_months(Months::new(months))
        .unwrap_or(roadmap.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    use crate::models::roadmap::{
        Difficulty, Milestone, MilestoneKind, PlannerAnalysis, TimeEstimate, TimeUnit,
    };

    fn milestone(kind: MilestoneKind, completed: bool) -> Milestone {
        Milestone {
            id: Uuid::new_v4(),
            title: "Step".to_string(),
            description: "Do the thing".to_string(),
            kind,
            difficulty: Difficulty::Intermediate,
            time_estimate: TimeEstimate {
                amount: 2,
                unit: TimeUnit::Weeks,
            },
            resources: vec![],
            order: 0,
            completed,
            completion_date: None,
            dependencies: vec![],
        }
    }

    fn roadmap_with(
        created_at: DateTime<Utc>,
        timeline_months: i32,
        milestones: Vec<Milestone>,
    ) -> Roadmap {
        Roadmap {
            id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            target_companies: vec![],
            title: "Plan".to_string(),
            description: String::new(),
            estimated_timeline_months: timeline_months,
            difficulty_score: 5,
            milestones,
            alternative_routes: vec![],
            analysis: PlannerAnalysis::default(),
            created_at,
        }
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_roadmap_scores_zero_everywhere() {
        let roadmap = roadmap_with(utc(2025, 1, 1), 6, vec![]);
        let report = score_progress(&roadmap, utc(2025, 4, 1));
        assert_eq!(report.completion_percentage, 0);
        assert_eq!(report.skill_improvement_score, 0);
        assert_eq!(report.total_milestones, 0);
        assert_eq!(report.completed_milestones, 0);
    }

    #[test]
    fn test_halfway_through_timeline_with_half_done_is_on_track() {
        // Created 2025-01-01, 6-month plan: 90 of 181 days elapsed on
        // 2025-04-01, so time progress sits just under 50%.
        let roadmap = roadmap_with(
            utc(2025, 1, 1),
            6,
            vec![
                milestone(MilestoneKind::Project, true),
                milestone(MilestoneKind::Project, false),
            ],
        );
        let report = score_progress(&roadmap, utc(2025, 4, 1));
        assert_eq!(report.completion_percentage, 50);
        assert_eq!(report.time_progress, 50);
        assert!(report.is_on_track);
    }

    #[test]
    fn test_behind_schedule_is_off_track() {
        let roadmap = roadmap_with(
            utc(2025, 1, 1),
            6,
            vec![
                milestone(MilestoneKind::Project, true),
                milestone(MilestoneKind::Project, false),
                milestone(MilestoneKind::Project, false),
            ],
        );
        let report = score_progress(&roadmap, utc(2025, 4, 1));
        assert_eq!(report.completion_percentage, 33);
        assert!(!report.is_on_track);
    }

    #[test]
    fn test_time_progress_clamps_at_100_after_deadline() {
        let roadmap = roadmap_with(utc(2024, 1, 1), 6, vec![milestone(MilestoneKind::Skill, false)]);
        let report = score_progress(&roadmap, utc(2025, 6, 1));
        assert_eq!(report.time_progress, 100);
        assert_eq!(report.remaining_time.days, 0);
        assert_eq!(report.remaining_time.months, 0);
    }

    #[test]
    fn test_time_progress_clamps_at_zero_before_start() {
        // A clock skew putting "now" before creation must not go negative.
        let roadmap = roadmap_with(utc(2025, 6, 1), 6, vec![]);
        let report = score_progress(&roadmap, utc(2025, 5, 1));
        assert_eq!(report.time_progress, 0);
    }

    #[test]
    fn test_remaining_time_rounds_days_up_and_months_up() {
        // 6-month plan from 2025-01-01 ends 2025-07-01; 10 days left on
        // 2025-06-21.
        let roadmap = roadmap_with(utc(2025, 1, 1), 6, vec![]);
        let report = score_progress(&roadmap, utc(2025, 6, 21));
        assert_eq!(report.remaining_time.days, 10);
        assert_eq!(report.remaining_time.months, 1);
    }

    #[test]
    fn test_skill_improvement_counts_only_skill_building_kinds() {
        let roadmap = roadmap_with(
            utc(2025, 1, 1),
            6,
            vec![
                milestone(MilestoneKind::Skill, true),
                milestone(MilestoneKind::Course, false),
                milestone(MilestoneKind::Certification, true),
                milestone(MilestoneKind::Project, true),
                milestone(MilestoneKind::Networking, false),
            ],
        );
        let report = score_progress(&roadmap, utc(2025, 2, 1));
        // 2 of 3 skill-building milestones done.
        assert_eq!(report.skill_improvement_score, 67);
        assert_eq!(report.completed_milestones, 3);
        assert_eq!(report.total_milestones, 5);
    }

    #[test]
    fn test_no_skill_milestones_scores_zero_without_dividing() {
        let roadmap = roadmap_with(
            utc(2025, 1, 1),
            6,
            vec![milestone(MilestoneKind::Project, true)],
        );
        let report = score_progress(&roadmap, utc(2025, 2, 1));
        assert_eq!(report.skill_improvement_score, 0);
        assert_eq!(report.completion_percentage, 100);
    }

    #[test]
    fn test_on_track_comparison_uses_unrounded_values() {
        // 2025-03-31 on a Jan-Jul plan: 89/181 days = 49.17%, displays as
        // 49. Completion 50% must count as on track.
        let roadmap = roadmap_with(
            utc(2025, 1, 1),
            6,
            vec![
                milestone(MilestoneKind::Project, true),
                milestone(MilestoneKind::Project, false),
            ],
        );
        let report = score_progress(&roadmap, utc(2025, 3, 31));
        assert_eq!(report.time_progress, 49);
        assert!(report.is_on_track);
    }
}
