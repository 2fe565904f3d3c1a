//! Short motivational summaries derived from an [`EffortAnalysis`].

use std::collections::BTreeSet;

use enum_map::EnumMap;

use crate::{
    config::AnalysisConfig,
    distances::StandardDistance,
    models::EffortAnalysis,
    pace::format_duration,
};

/// Insights using the default thresholds.
pub fn get_best_effort_insights(analysis: &EffortAnalysis) -> Vec<String> {
    best_effort_insights_with(analysis, &AnalysisConfig::default())
}

pub fn best_effort_insights_with(analysis: &EffortAnalysis, config: &AnalysisConfig) -> Vec<String> {
    let mut insights = Vec::new();

    let pr_dates: BTreeSet<_> = analysis.recent_prs.iter().map(|pr| pr.workout_date).collect();
    if pr_dates.len() >= config.streak_min_dates {
        insights.push(format!(
            "PR streak: you've set personal records on {} different days in the last {} days. Keep it rolling!",
            pr_dates.len(),
            config.recent_pr_days
        ));
    }

    let mut per_distance: EnumMap<StandardDistance, usize> = EnumMap::default();
    for pr in &analysis.recent_prs {
        per_distance[pr.distance] += 1;
    }
    // Strictly greater keeps the shorter distance on ties.
    let top = per_distance
        .iter()
        .fold(None, |best: Option<(StandardDistance, usize)>, (d, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((d, n)),
        });
    if let Some((distance, count)) = top
        && count >= config.specialization_min_prs.max(1)
    {
        insights.push(format!(
            "Your {distance} is your specialty right now: {count} recent PRs at that distance."
        ));
    }

    let saved: f64 = analysis
        .recent_prs
        .iter()
        .filter_map(|pr| pr.improvement_seconds)
        .sum();
    if saved > config.cumulative_improvement_seconds {
        insights.push(format!(
            "You've cut {} off your personal records recently.",
            format_duration(saved)
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BestEffort;
    use time::{Date, macros::date};
    use uuid::Uuid;

    fn pr(distance: StandardDistance, date: Date, improvement: Option<f64>) -> BestEffort {
        BestEffort {
            workout_id: Uuid::new_v4(),
            workout_date: date,
            distance,
            distance_meters: distance.meters(),
            time_seconds: 100.0,
            time_formatted: "1:40".into(),
            pace_seconds_per_mile: 400.0,
            pace_formatted: "6:40".into(),
            start_lap_index: 0,
            end_lap_index: 0,
            is_pr: true,
            rank_all_time: Some(1),
            improvement_seconds: improvement,
            equivalent_vdot: 40,
        }
    }

    fn analysis(recent_prs: Vec<BestEffort>) -> EffortAnalysis {
        EffortAnalysis {
            recent_prs,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_insights_for_empty_analysis() {
        assert!(get_best_effort_insights(&EffortAnalysis::default()).is_empty());
    }

    #[test]
    fn test_streak_needs_three_distinct_dates() {
        let two_days = analysis(vec![
            pr(StandardDistance::FiveK, date!(2024 - 05 - 01), None),
            pr(StandardDistance::Mile, date!(2024 - 05 - 01), None),
            pr(StandardDistance::TenK, date!(2024 - 05 - 03), None),
        ]);
        assert!(!get_best_effort_insights(&two_days).iter().any(|s| s.starts_with("PR streak")));

        let three_days = analysis(vec![
            pr(StandardDistance::FiveK, date!(2024 - 05 - 01), None),
            pr(StandardDistance::Mile, date!(2024 - 05 - 02), None),
            pr(StandardDistance::TenK, date!(2024 - 05 - 03), None),
        ]);
        let insights = get_best_effort_insights(&three_days);
        assert!(insights[0].starts_with("PR streak"));
        assert!(insights[0].contains("3 different days"));
    }

    #[test]
    fn test_specialization() {
        let single = analysis(vec![pr(StandardDistance::FiveK, date!(2024 - 05 - 01), None)]);
        assert!(get_best_effort_insights(&single).is_empty());

        let tied = analysis(vec![
            pr(StandardDistance::TenK, date!(2024 - 05 - 02), None),
            pr(StandardDistance::FiveK, date!(2024 - 05 - 02), None),
            pr(StandardDistance::TenK, date!(2024 - 05 - 01), None),
            pr(StandardDistance::FiveK, date!(2024 - 05 - 01), None),
        ]);
        let insights = get_best_effort_insights(&tied);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].starts_with("Your 5K is your specialty"));
    }

    #[test]
    fn test_cumulative_improvement_threshold() {
        let exactly_sixty = analysis(vec![
            pr(StandardDistance::FiveK, date!(2024 - 05 - 01), Some(30.0)),
            pr(StandardDistance::TenK, date!(2024 - 05 - 01), Some(30.0)),
        ]);
        assert!(get_best_effort_insights(&exactly_sixty).is_empty());

        let over = analysis(vec![
            pr(StandardDistance::FiveK, date!(2024 - 05 - 01), Some(45.0)),
            pr(StandardDistance::TenK, date!(2024 - 05 - 01), Some(30.0)),
            pr(StandardDistance::Mile, date!(2024 - 05 - 01), None),
        ]);
        assert_eq!(
            get_best_effort_insights(&over),
            vec!["You've cut 1:15 off your personal records recently.".to_string()]
        );
    }
}
