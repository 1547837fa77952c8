use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::ClubMetrics;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn upsert_club(pool: &PgPool, id: Uuid, name: &str) -> anyhow::Result<Uuid> {
    let row = sqlx::query(
        r#"
        INSERT INTO club_health.clubs (id, name)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE
        SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

async fn upsert_snapshot(pool: &PgPool, metrics: &ClubMetrics) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO club_health.metric_snapshots
        (id, club_id, total_members, active_members, events_this_month,
         new_members_last_30_days, member_retention, event_attendance,
         member_satisfaction, leadership_development, community_impact,
         financial_health, growth_rate, engagement_score, measured_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (club_id, measured_at) DO UPDATE SET
            total_members = EXCLUDED.total_members,
            active_members = EXCLUDED.active_members,
            events_this_month = EXCLUDED.events_this_month,
            new_members_last_30_days = EXCLUDED.new_members_last_30_days,
            member_retention = EXCLUDED.member_retention,
            event_attendance = EXCLUDED.event_attendance,
            member_satisfaction = EXCLUDED.member_satisfaction,
            leadership_development = EXCLUDED.leadership_development,
            community_impact = EXCLUDED.community_impact,
            financial_health = EXCLUDED.financial_health,
            growth_rate = EXCLUDED.growth_rate,
            engagement_score = EXCLUDED.engagement_score
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(metrics.club_id)
    .bind(metrics.total_members)
    .bind(metrics.active_members)
    .bind(metrics.events_this_month)
    .bind(metrics.new_members_last_30_days)
    .bind(metrics.member_retention)
    .bind(metrics.event_attendance)
    .bind(metrics.member_satisfaction)
    .bind(metrics.leadership_development)
    .bind(metrics.community_impact)
    .bind(metrics.financial_health)
    .bind(metrics.growth_rate)
    .bind(metrics.engagement_score)
    .bind(metrics.last_updated)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let snapshots = vec![
        ClubMetrics {
            club_id: Uuid::parse_str("7c3d2b8e-5a61-4f2d-9c44-1b9e6f0a2d51")?,
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
            last_updated: NaiveDate::from_ymd_opt(2026, 2, 1).context("invalid date")?,
        },
        ClubMetrics {
            club_id: Uuid::parse_str("4f9a7e21-8d3b-4c5e-b1a0-6e2d8c4f7b93")?,
            club_name: "Debate Society".to_string(),
            total_members: 32,
            active_members: 21,
            events_this_month: 3,
            new_members_last_30_days: 3,
            member_retention: 71.0,
            event_attendance: 62.0,
            member_satisfaction: 7.8,
            leadership_development: 72.0,
            community_impact: 34.0,
            financial_health: 76.0,
            growth_rate: 8.0,
            engagement_score: 69.0,
            last_updated: NaiveDate::from_ymd_opt(2026, 1, 29).context("invalid date")?,
        },
        ClubMetrics {
            club_id: Uuid::parse_str("b2e6c9d4-0f17-4a8b-8e55-3c1a9d7e6f02")?,
            club_name: "Environmental Alliance".to_string(),
            total_members: 56,
            active_members: 44,
            events_this_month: 6,
            new_members_last_30_days: 9,
            member_retention: 86.0,
            event_attendance: 79.0,
            member_satisfaction: 8.6,
            leadership_development: 68.0,
            community_impact: 112.0,
            financial_health: 83.0,
            growth_rate: 16.0,
            engagement_score: 87.0,
            last_updated: NaiveDate::from_ymd_opt(2026, 2, 2).context("invalid date")?,
        },
        ClubMetrics {
            club_id: Uuid::parse_str("e8d1f5a7-6b29-4e0c-a3d8-9f4b2c7e1a64")?,
            club_name: "Chess Club".to_string(),
            total_members: 18,
            active_members: 9,
            events_this_month: 2,
            new_members_last_30_days: 1,
            member_retention: 58.0,
            event_attendance: 51.0,
            member_satisfaction: 6.4,
            leadership_development: 41.0,
            community_impact: 12.0,
            financial_health: 47.0,
            growth_rate: 3.0,
            engagement_score: 52.0,
            last_updated: NaiveDate::from_ymd_opt(2026, 1, 27).context("invalid date")?,
        },
    ];

    for metrics in snapshots {
        metrics.validate()?;
        let club_id = upsert_club(pool, metrics.club_id, &metrics.club_name).await?;
        let metrics = ClubMetrics { club_id, ..metrics };
        upsert_snapshot(pool, &metrics).await?;
        debug!(club = %metrics.club_name, "seeded snapshot");
    }

    Ok(())
}

pub async fn fetch_latest_metrics(
    pool: &PgPool,
    club: Option<&str>,
) -> anyhow::Result<Vec<ClubMetrics>> {
    let mut query = String::from(
        "SELECT DISTINCT ON (c.id) c.id AS club_id, c.name, s.total_members, \
         s.active_members, s.events_this_month, s.new_members_last_30_days, \
         s.member_retention, s.event_attendance, s.member_satisfaction, \
         s.leadership_development, s.community_impact, s.financial_health, \
         s.growth_rate, s.engagement_score, s.measured_at \
         FROM club_health.metric_snapshots s \
         JOIN club_health.clubs c ON c.id = s.club_id",
    );

    if club.is_some() {
        query.push_str(" WHERE c.name = $1");
    }
    query.push_str(" ORDER BY c.id, s.measured_at DESC");

    let mut rows = sqlx::query(&query);
    if let Some(value) = club {
        rows = rows.bind(value);
    }

    let records = rows.fetch_all(pool).await?;
    let mut clubs = Vec::new();

    for row in records {
        let metrics = ClubMetrics {
            club_id: row.get("club_id"),
            club_name: row.get("name"),
            total_members: row.get("total_members"),
            active_members: row.get("active_members"),
            events_this_month: row.get("events_this_month"),
            new_members_last_30_days: row.get("new_members_last_30_days"),
            member_retention: row.get("member_retention"),
            event_attendance: row.get("event_attendance"),
            member_satisfaction: row.get("member_satisfaction"),
            leadership_development: row.get("leadership_development"),
            community_impact: row.get("community_impact"),
            financial_health: row.get("financial_health"),
            growth_rate: row.get("growth_rate"),
            engagement_score: row.get("engagement_score"),
            last_updated: row.get("measured_at"),
        };
        metrics.validate()?;
        clubs.push(metrics);
    }

    clubs.sort_by(|a, b| a.club_name.cmp(&b.club_name));
    debug!(count = clubs.len(), "fetched latest snapshots");
    Ok(clubs)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        club_name: String,
        total_members: i32,
        active_members: i32,
        events_this_month: i32,
        new_members_last_30_days: i32,
        member_retention: f64,
        event_attendance: f64,
        member_satisfaction: f64,
        leadership_development: f64,
        community_impact: f64,
        financial_health: f64,
        growth_rate: f64,
        engagement_score: f64,
        measured_at: NaiveDate,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut imported = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let club_id = upsert_club(pool, Uuid::new_v4(), &row.club_name).await?;

        let metrics = ClubMetrics {
            club_id,
            club_name: row.club_name,
            total_members: row.total_members,
            active_members: row.active_members,
            events_this_month: row.events_this_month,
            new_members_last_30_days: row.new_members_last_30_days,
            member_retention: row.member_retention,
            event_attendance: row.event_attendance,
            member_satisfaction: row.member_satisfaction,
            leadership_development: row.leadership_development,
            community_impact: row.community_impact,
            financial_health: row.financial_health,
            growth_rate: row.growth_rate,
            engagement_score: row.engagement_score,
            last_updated: row.measured_at,
        };

        // The scorer assumes validated input; a malformed row fails the
        // whole import here.
        metrics.validate()?;
        upsert_snapshot(pool, &metrics).await?;
        imported += 1;
    }

    info!(imported, "csv import complete");
    Ok(imported)
}
