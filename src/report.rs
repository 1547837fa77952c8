use std::fmt::Write;

use chrono::NaiveDate;

use crate::health;
use crate::models::{BenchmarkTable, ClubMetrics, HealthAssessment, MetricKey};
use crate::recommend;

#[derive(Debug, Clone)]
pub struct MetricHotspot {
    pub metric: MetricKey,
    pub clubs_below: usize,
}

pub fn metric_hotspots(clubs: &[ClubMetrics], benchmarks: &BenchmarkTable) -> Vec<MetricHotspot> {
    let mut hotspots: Vec<MetricHotspot> = MetricKey::ALL
        .iter()
        .map(|&metric| MetricHotspot {
            metric,
            clubs_below: clubs
                .iter()
                .filter(|club| club.scored_value(metric) < benchmarks.target(metric))
                .count(),
        })
        .filter(|hotspot| hotspot.clubs_below > 0)
        .collect();

    hotspots.sort_by(|a, b| b.clubs_below.cmp(&a.clubs_below));
    hotspots
}

pub fn build_report(
    scope: Option<&str>,
    clubs: &[ClubMetrics],
    benchmarks: &BenchmarkTable,
    generated_on: NaiveDate,
) -> String {
    // Worst overall score first; this is an early-warning document.
    let mut ranked: Vec<(&ClubMetrics, HealthAssessment)> = clubs
        .iter()
        .map(|club| (club, health::assess(club, benchmarks)))
        .collect();
    ranked.sort_by(|a, b| a.1.overall_score.cmp(&b.1.overall_score));

    let hotspots = metric_hotspots(clubs, benchmarks);

    let mut output = String::new();
    let scope_label = scope.unwrap_or("all clubs");

    let _ = writeln!(output, "# Club Health Report");
    let _ = writeln!(output, "Generated for {} on {}", scope_label, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Standings");

    if ranked.is_empty() {
        let _ = writeln!(output, "No clubs with metric snapshots.");
    } else {
        for (club, assessment) in ranked.iter() {
            let _ = writeln!(
                output,
                "- {}: overall {} ({}), {} of {} members active, last updated {}",
                assessment.club_name,
                assessment.overall_score,
                assessment.overall_band.as_str(),
                club.active_members,
                club.total_members,
                club.last_updated
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Metric Hotspots");

    if hotspots.is_empty() {
        let _ = writeln!(output, "Every metric is at or above benchmark.");
    } else {
        for hotspot in hotspots.iter() {
            let _ = writeln!(
                output,
                "- {}: {} of {} clubs below benchmark",
                hotspot.metric.display_name(),
                hotspot.clubs_below,
                clubs.len()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Actions");

    let mut any_actions = false;
    for (club, assessment) in ranked.iter() {
        let recommendations = recommend::recommend(club, benchmarks);
        if recommendations.is_empty() {
            continue;
        }
        any_actions = true;

        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "### {} (overall {})",
            assessment.club_name, assessment.overall_score
        );
        for recommendation in recommendations.iter().take(3) {
            let _ = writeln!(
                output,
                "- [{}] {}",
                recommendation.priority.as_str(),
                recommendation.title
            );
            for tip in recommendation.tips {
                let _ = writeln!(output, "  - {tip}");
            }
        }
    }

    if !any_actions {
        let _ = writeln!(output, "No clubs below benchmark on any tracked metric.");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn club(name: &str, scored: [f64; 8]) -> ClubMetrics {
        ClubMetrics {
            club_id: Uuid::new_v4(),
            club_name: name.to_string(),
            total_members: 25,
            active_members: 17,
            events_this_month: 3,
            new_members_last_30_days: 2,
            member_retention: scored[0],
            event_attendance: scored[1],
            member_satisfaction: scored[2],
            leadership_development: scored[3],
            community_impact: scored[4],
            financial_health: scored[5],
            growth_rate: scored[6],
            engagement_score: scored[7],
            last_updated: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()
    }

    #[test]
    fn report_contains_expected_sections() {
        let benchmarks = BenchmarkTable::standard();
        let clubs = vec![club(
            "Art Collective",
            [80.0, 75.0, 8.0, 70.0, 60.0, 85.0, 12.0, 80.0],
        )];
        let rendered = build_report(None, &clubs, &benchmarks, report_date());

        assert!(rendered.contains("# Club Health Report"));
        assert!(rendered.contains("Generated for all clubs on 2026-02-05"));
        assert!(rendered.contains("## Standings"));
        assert!(rendered.contains("## Metric Hotspots"));
        assert!(rendered.contains("## Recommended Actions"));
    }

    #[test]
    fn standings_list_worst_club_first() {
        let benchmarks = BenchmarkTable::standard();
        let clubs = vec![
            club(
                "Art Collective",
                [80.0, 75.0, 8.0, 70.0, 60.0, 85.0, 12.0, 80.0],
            ),
            club("Chess Club", [40.0, 30.0, 5.0, 20.0, 10.0, 35.0, 2.0, 40.0]),
        ];
        let rendered = build_report(None, &clubs, &benchmarks, report_date());

        let chess = rendered.find("- Chess Club").unwrap();
        let art = rendered.find("- Art Collective").unwrap();
        assert!(chess < art);
    }

    #[test]
    fn actions_are_truncated_to_three_per_club() {
        let benchmarks = BenchmarkTable::standard();
        // Below benchmark on all six rule metrics; only the first three
        // rules in declaration order should render.
        let clubs = vec![club("Chess Club", [40.0, 30.0, 5.0, 20.0, 10.0, 35.0, 2.0, 40.0])];
        let rendered = build_report(None, &clubs, &benchmarks, report_date());

        assert!(rendered.contains("Improve member retention"));
        assert!(rendered.contains("Boost event attendance"));
        assert!(rendered.contains("Raise member satisfaction"));
        assert!(!rendered.contains("Develop future leaders"));
        assert!(!rendered.contains("Stabilize club finances"));
    }

    #[test]
    fn hotspots_count_clubs_below_benchmark() {
        let benchmarks = BenchmarkTable::standard();
        let clubs = vec![
            club(
                "Art Collective",
                [80.0, 30.0, 8.0, 70.0, 60.0, 85.0, 12.0, 80.0],
            ),
            club(
                "Chess Club",
                [40.0, 30.0, 8.0, 70.0, 60.0, 85.0, 12.0, 80.0],
            ),
        ];
        let hotspots = metric_hotspots(&clubs, &benchmarks);

        assert_eq!(hotspots[0].metric, MetricKey::EventAttendance);
        assert_eq!(hotspots[0].clubs_below, 2);
        assert!(hotspots
            .iter()
            .any(|h| h.metric == MetricKey::MemberRetention && h.clubs_below == 1));
    }

    #[test]
    fn healthy_program_renders_fallback_lines() {
        let benchmarks = BenchmarkTable::standard();
        let clubs = vec![club(
            "Art Collective",
            [80.0, 75.0, 8.0, 70.0, 60.0, 85.0, 12.0, 80.0],
        )];
        let rendered = build_report(Some("Art Collective"), &clubs, &benchmarks, report_date());

        assert!(rendered.contains("Generated for Art Collective"));
        assert!(rendered.contains("Every metric is at or above benchmark."));
        assert!(rendered.contains("No clubs below benchmark on any tracked metric."));
    }

    #[test]
    fn empty_input_renders_empty_standings() {
        let benchmarks = BenchmarkTable::standard();
        let rendered = build_report(None, &[], &benchmarks, report_date());
        assert!(rendered.contains("No clubs with metric snapshots."));
    }
}
