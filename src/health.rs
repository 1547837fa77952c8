use crate::models::{
    BenchmarkTable, ClubMetrics, HealthAssessment, HealthLabel, MetricAssessment, MetricKey,
    OverallBand,
};

pub fn assess(metrics: &ClubMetrics, benchmarks: &BenchmarkTable) -> HealthAssessment {
    let per_metric = MetricKey::ALL
        .iter()
        .map(|&key| assess_metric(metrics, benchmarks, key))
        .collect();

    let score = overall_score(metrics, benchmarks);

    HealthAssessment {
        club_id: metrics.club_id,
        club_name: metrics.club_name.clone(),
        metrics: per_metric,
        overall_score: score,
        overall_band: OverallBand::from_score(score),
    }
}

fn assess_metric(
    metrics: &ClubMetrics,
    benchmarks: &BenchmarkTable,
    key: MetricKey,
) -> MetricAssessment {
    let value = metrics.scored_value(key);
    let benchmark = benchmarks.target(key);
    let ratio = benchmark_ratio(value, benchmark);
    let label = label_for_ratio(ratio);

    MetricAssessment {
        metric: key,
        value,
        benchmark,
        ratio,
        label,
        color: label.color(),
    }
}

pub fn benchmark_ratio(value: f64, benchmark: f64) -> Option<f64> {
    if benchmark > 0.0 {
        Some(value / benchmark)
    } else {
        None
    }
}

pub fn label_for_ratio(ratio: Option<f64>) -> HealthLabel {
    match ratio {
        Some(r) if r >= 1.0 => HealthLabel::Excellent,
        Some(r) if r >= 0.8 => HealthLabel::Good,
        Some(r) if r >= 0.6 => HealthLabel::NeedsWork,
        _ => HealthLabel::Critical,
    }
}

/// Composite score over the six scored metrics, each contributing at most
/// 100 points before averaging. An undefined ratio contributes nothing.
pub fn overall_score(metrics: &ClubMetrics, benchmarks: &BenchmarkTable) -> u8 {
    let total: f64 = MetricKey::COMPOSITE
        .iter()
        .map(|&key| {
            match benchmark_ratio(metrics.scored_value(key), benchmarks.target(key)) {
                Some(ratio) => (ratio * 100.0).min(100.0),
                None => 0.0,
            }
        })
        .sum();

    (total / MetricKey::COMPOSITE.len() as f64).round() as u8
}
