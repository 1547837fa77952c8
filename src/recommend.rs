use crate::models::{BenchmarkTable, ClubMetrics, MetricKey, Priority, Recommendation};

struct Rule {
    metric: MetricKey,
    priority: Priority,
    title: &'static str,
    tips: [&'static str; 4],
}

/// Declaration order here is the output order; truncated "top 3" views
/// depend on it, so the table is never re-sorted by priority.
static RULES: [Rule; 6] = [
    Rule {
        metric: MetricKey::MemberRetention,
        priority: Priority::High,
        title: "Improve member retention",
        tips: [
            "Pair every new member with a returning member for their first month",
            "Check in one-on-one with anyone who misses two meetings in a row",
            "Close each semester by recognizing members who showed up consistently",
            "Ask departing members why they left and act on the top reason",
        ],
    },
    Rule {
        metric: MetricKey::EventAttendance,
        priority: Priority::Medium,
        title: "Boost event attendance",
        tips: [
            "Poll members for meeting times before fixing the calendar",
            "Send a reminder the day before and the hour before each event",
            "Co-host one event per month with a neighboring club",
            "Rotate event formats so the same few members are not the only draw",
        ],
    },
    Rule {
        metric: MetricKey::MemberSatisfaction,
        priority: Priority::High,
        title: "Raise member satisfaction",
        tips: [
            "Run a short anonymous pulse survey after every major event",
            "Publish what changed because of the last survey",
            "Hold officer office hours so concerns surface early",
            "Give members a direct say in picking next semester's activities",
        ],
    },
    Rule {
        metric: MetricKey::LeadershipDevelopment,
        priority: Priority::Medium,
        title: "Develop future leaders",
        tips: [
            "Let interested members shadow an officer for a full term",
            "Delegate one real responsibility per event to a non-officer",
            "Run a leadership workshop with an alum or faculty advisor",
            "Write down a succession plan before elections, not after",
        ],
    },
    Rule {
        metric: MetricKey::FinancialHealth,
        priority: Priority::High,
        title: "Stabilize club finances",
        tips: [
            "Review the budget with the treasurer at the start of each month",
            "Line up one recurring fundraiser instead of ad-hoc drives",
            "Approach local businesses about small sponsorships",
            "Collect dues early in the semester while engagement is highest",
        ],
    },
    Rule {
        metric: MetricKey::GrowthRate,
        priority: Priority::Low,
        title: "Accelerate membership growth",
        tips: [
            "Table at the activities fair with a signup that takes under a minute",
            "Keep a steady posting cadence on the channels students actually use",
            "Give members a referral shout-out when a friend joins",
            "Open one event per month to non-members, no commitment required",
        ],
    },
];

/// Community impact and engagement score carry no rule; they never produce
/// a recommendation regardless of their values.
pub fn recommend(metrics: &ClubMetrics, benchmarks: &BenchmarkTable) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|rule| metrics.scored_value(rule.metric) < benchmarks.target(rule.metric))
        .map(|rule| Recommendation {
            metric: rule.metric,
            priority: rule.priority,
            title: rule.title,
            tips: &rule.tips,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn metrics_with(scored: [f64; 8]) -> ClubMetrics {
        ClubMetrics {
            club_id: Uuid::new_v4(),
            club_name: "Chess Club".to_string(),
            total_members: 18,
            active_members: 9,
            events_this_month: 2,
            new_members_last_30_days: 1,
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

    #[test]
    fn worked_example_triggers_retention_then_finances() {
        let benchmarks = BenchmarkTable::standard();
        let metrics = metrics_with([60.0, 90.0, 9.0, 70.0, 55.0, 50.0, 15.0, 80.0]);
        let recommendations = recommend(&metrics, &benchmarks);

        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].metric, MetricKey::MemberRetention);
        assert_eq!(recommendations[0].priority, Priority::High);
        assert_eq!(recommendations[1].metric, MetricKey::FinancialHealth);
        assert_eq!(recommendations[1].priority, Priority::High);
    }

    #[test]
    fn no_recommendations_when_every_target_is_met() {
        let benchmarks = BenchmarkTable::standard();
        let metrics = metrics_with([
            benchmarks.member_retention,
            benchmarks.event_attendance,
            benchmarks.member_satisfaction,
            benchmarks.leadership_development,
            0.0,
            benchmarks.financial_health,
            benchmarks.growth_rate,
            0.0,
        ]);

        assert!(recommend(&metrics, &benchmarks).is_empty());
    }

    #[test]
    fn meeting_the_benchmark_exactly_does_not_trigger() {
        let benchmarks = BenchmarkTable::standard();
        let mut metrics = metrics_with([100.0; 8]);
        metrics.member_retention = benchmarks.member_retention;
        metrics.member_satisfaction = benchmarks.member_satisfaction;

        let recommendations = recommend(&metrics, &benchmarks);
        assert!(recommendations
            .iter()
            .all(|r| r.metric != MetricKey::MemberRetention));
    }

    #[test]
    fn all_rules_fire_in_declaration_order() {
        let benchmarks = BenchmarkTable::standard();
        let metrics = metrics_with([0.0; 8]);
        let recommendations = recommend(&metrics, &benchmarks);

        let order: Vec<MetricKey> = recommendations.iter().map(|r| r.metric).collect();
        assert_eq!(
            order,
            vec![
                MetricKey::MemberRetention,
                MetricKey::EventAttendance,
                MetricKey::MemberSatisfaction,
                MetricKey::LeadershipDevelopment,
                MetricKey::FinancialHealth,
                MetricKey::GrowthRate,
            ]
        );
        assert!(recommendations.iter().all(|r| r.tips.len() == 4));
    }

    #[test]
    fn informational_metrics_never_recommend() {
        let benchmarks = BenchmarkTable::standard();
        let mut metrics = metrics_with([100.0; 8]);
        metrics.member_satisfaction = 10.0;
        metrics.growth_rate = 50.0;
        metrics.community_impact = 0.0;
        metrics.engagement_score = 0.0;

        assert!(recommend(&metrics, &benchmarks).is_empty());
    }
}
