use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::MetricsError;

/// The eight scored metrics tracked per club. Declaration order is the
/// render order everywhere an assessment is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    MemberRetention,
    EventAttendance,
    MemberSatisfaction,
    LeadershipDevelopment,
    CommunityImpact,
    FinancialHealth,
    GrowthRate,
    EngagementScore,
}

impl MetricKey {
    pub const ALL: [MetricKey; 8] = [
        MetricKey::MemberRetention,
        MetricKey::EventAttendance,
        MetricKey::MemberSatisfaction,
        MetricKey::LeadershipDevelopment,
        MetricKey::CommunityImpact,
        MetricKey::FinancialHealth,
        MetricKey::GrowthRate,
        MetricKey::EngagementScore,
    ];

    /// The six metrics that feed the overall score. Community impact and
    /// engagement score are tracked and labeled but excluded from the
    /// composite.
    pub const COMPOSITE: [MetricKey; 6] = [
        MetricKey::MemberRetention,
        MetricKey::EventAttendance,
        MetricKey::MemberSatisfaction,
        MetricKey::LeadershipDevelopment,
        MetricKey::FinancialHealth,
        MetricKey::GrowthRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::MemberRetention => "member_retention",
            MetricKey::EventAttendance => "event_attendance",
            MetricKey::MemberSatisfaction => "member_satisfaction",
            MetricKey::LeadershipDevelopment => "leadership_development",
            MetricKey::CommunityImpact => "community_impact",
            MetricKey::FinancialHealth => "financial_health",
            MetricKey::GrowthRate => "growth_rate",
            MetricKey::EngagementScore => "engagement_score",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MetricKey::MemberRetention => "Member retention",
            MetricKey::EventAttendance => "Event attendance",
            MetricKey::MemberSatisfaction => "Member satisfaction",
            MetricKey::LeadershipDevelopment => "Leadership development",
            MetricKey::CommunityImpact => "Community impact",
            MetricKey::FinancialHealth => "Financial health",
            MetricKey::GrowthRate => "Growth rate",
            MetricKey::EngagementScore => "Engagement score",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKey::MemberSatisfaction => "/10",
            MetricKey::CommunityImpact => "h",
            MetricKey::EngagementScore => "",
            _ => "%",
        }
    }
}

/// Latest measured values for one club. Every scored metric is always
/// present; `validate` is the boundary that keeps malformed rows out of
/// the scorer.
#[derive(Debug, Clone)]
pub struct ClubMetrics {
    pub club_id: Uuid,
    pub club_name: String,
    pub total_members: i32,
    pub active_members: i32,
    pub events_this_month: i32,
    pub new_members_last_30_days: i32,
    pub member_retention: f64,
    pub event_attendance: f64,
    pub member_satisfaction: f64,
    pub leadership_development: f64,
    pub community_impact: f64,
    pub financial_health: f64,
    pub growth_rate: f64,
    pub engagement_score: f64,
    pub last_updated: NaiveDate,
}

impl ClubMetrics {
    pub fn scored_value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::MemberRetention => self.member_retention,
            MetricKey::EventAttendance => self.event_attendance,
            MetricKey::MemberSatisfaction => self.member_satisfaction,
            MetricKey::LeadershipDevelopment => self.leadership_development,
            MetricKey::CommunityImpact => self.community_impact,
            MetricKey::FinancialHealth => self.financial_health,
            MetricKey::GrowthRate => self.growth_rate,
            MetricKey::EngagementScore => self.engagement_score,
        }
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        for (metric, count) in [
            ("total_members", self.total_members),
            ("active_members", self.active_members),
            ("events_this_month", self.events_this_month),
            ("new_members_last_30_days", self.new_members_last_30_days),
        ] {
            if count < 0 {
                return Err(MetricsError::Negative {
                    club: self.club_name.clone(),
                    metric,
                });
            }
        }

        for key in MetricKey::ALL {
            let value = self.scored_value(key);
            if !value.is_finite() {
                return Err(MetricsError::NonFinite {
                    club: self.club_name.clone(),
                    metric: key.as_str(),
                });
            }
            if value < 0.0 {
                return Err(MetricsError::Negative {
                    club: self.club_name.clone(),
                    metric: key.as_str(),
                });
            }
        }

        Ok(())
    }
}

/// Program-wide target per scored metric. One benchmark per metric, never
/// per-club.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkTable {
    pub member_retention: f64,
    pub event_attendance: f64,
    pub member_satisfaction: f64,
    pub leadership_development: f64,
    pub community_impact: f64,
    pub financial_health: f64,
    pub growth_rate: f64,
    pub engagement_score: f64,
}

impl BenchmarkTable {
    pub fn standard() -> Self {
        BenchmarkTable {
            member_retention: 75.0,
            event_attendance: 70.0,
            member_satisfaction: 7.5,
            leadership_development: 60.0,
            community_impact: 50.0,
            financial_health: 80.0,
            growth_rate: 10.0,
            engagement_score: 75.0,
        }
    }

    pub fn target(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::MemberRetention => self.member_retention,
            MetricKey::EventAttendance => self.event_attendance,
            MetricKey::MemberSatisfaction => self.member_satisfaction,
            MetricKey::LeadershipDevelopment => self.leadership_development,
            MetricKey::CommunityImpact => self.community_impact,
            MetricKey::FinancialHealth => self.financial_health,
            MetricKey::GrowthRate => self.growth_rate,
            MetricKey::EngagementScore => self.engagement_score,
        }
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        BenchmarkTable::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthLabel {
    Excellent,
    Good,
    NeedsWork,
    Critical,
}

impl HealthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Excellent => "excellent",
            HealthLabel::Good => "good",
            HealthLabel::NeedsWork => "needs work",
            HealthLabel::Critical => "critical",
        }
    }

    pub fn color(&self) -> ColorTier {
        match self {
            HealthLabel::Excellent => ColorTier::Green,
            HealthLabel::Good => ColorTier::Blue,
            HealthLabel::NeedsWork => ColorTier::Amber,
            HealthLabel::Critical => ColorTier::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorTier {
    Green,
    Blue,
    Amber,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverallBand {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl OverallBand {
    pub fn from_score(score: u8) -> OverallBand {
        match score {
            80.. => OverallBand::Excellent,
            60..=79 => OverallBand::Good,
            40..=59 => OverallBand::NeedsAttention,
            _ => OverallBand::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallBand::Excellent => "excellent",
            OverallBand::Good => "good",
            OverallBand::NeedsAttention => "needs attention",
            OverallBand::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAssessment {
    pub metric: MetricKey,
    pub value: f64,
    pub benchmark: f64,
    /// `None` when the benchmark is zero or negative; such a metric is
    /// classified critical without ever dividing.
    pub ratio: Option<f64>,
    pub label: HealthLabel,
    pub color: ColorTier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub club_id: Uuid,
    pub club_name: String,
    pub metrics: Vec<MetricAssessment>,
    pub overall_score: u8,
    pub overall_band: OverallBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub metric: MetricKey,
    pub priority: Priority,
    pub title: &'static str,
    pub tips: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> ClubMetrics {
        ClubMetrics {
            club_id: Uuid::new_v4(),
            club_name: "Robotics Club".to_string(),
            total_members: 48,
            active_members: 31,
            events_this_month: 5,
            new_members_last_30_days: 6,
            member_retention: 82.0,
            event_attendance: 74.0,
            member_satisfaction: 8.1,
            leadership_development: 65.0,
            community_impact: 58.0,
            financial_health: 88.0,
            growth_rate: 12.5,
            engagement_score: 81.0,
            last_updated: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_metrics() {
        assert!(sample_metrics().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let mut metrics = sample_metrics();
        metrics.growth_rate = f64::NAN;
        assert!(matches!(
            metrics.validate(),
            Err(MetricsError::NonFinite {
                metric: "growth_rate",
                ..
            })
        ));

        metrics.growth_rate = f64::INFINITY;
        assert!(metrics.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_values() {
        let mut metrics = sample_metrics();
        metrics.financial_health = -1.0;
        assert!(matches!(
            metrics.validate(),
            Err(MetricsError::Negative {
                metric: "financial_health",
                ..
            })
        ));

        let mut metrics = sample_metrics();
        metrics.total_members = -3;
        assert!(matches!(
            metrics.validate(),
            Err(MetricsError::Negative {
                metric: "total_members",
                ..
            })
        ));
    }

    #[test]
    fn standard_benchmarks_are_positive_for_every_metric() {
        let benchmarks = BenchmarkTable::standard();
        for key in MetricKey::ALL {
            assert!(benchmarks.target(key) > 0.0, "{} has no target", key.as_str());
        }
    }

    #[test]
    fn overall_bands_follow_score_tiers() {
        assert_eq!(OverallBand::from_score(100), OverallBand::Excellent);
        assert_eq!(OverallBand::from_score(80), OverallBand::Excellent);
        assert_eq!(OverallBand::from_score(79), OverallBand::Good);
        assert_eq!(OverallBand::from_score(60), OverallBand::Good);
        assert_eq!(OverallBand::from_score(59), OverallBand::NeedsAttention);
        assert_eq!(OverallBand::from_score(40), OverallBand::NeedsAttention);
        assert_eq!(OverallBand::from_score(39), OverallBand::Critical);
        assert_eq!(OverallBand::from_score(0), OverallBand::Critical);
    }

    #[test]
    fn composite_set_excludes_informational_metrics() {
        assert!(!MetricKey::COMPOSITE.contains(&MetricKey::CommunityImpact));
        assert!(!MetricKey::COMPOSITE.contains(&MetricKey::EngagementScore));
        assert_eq!(MetricKey::COMPOSITE.len(), 6);
    }
}
