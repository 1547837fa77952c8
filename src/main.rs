use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

mod db;
mod error;
mod health;
mod models;
mod recommend;
mod report;

use crate::models::{BenchmarkTable, HealthAssessment};

#[derive(Parser)]
#[command(name = "club-health")]
#[command(about = "Club health scoring and recommendations for ClubConnect", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import metric snapshots from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Score clubs against the standard benchmarks
    Assess {
        #[arg(long)]
        club: Option<String>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List triggered recommendations for one club
    Recommend {
        #[arg(long)]
        club: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        club: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let imported = db::import_csv(&pool, &csv).await?;
            println!("Imported {imported} snapshots from {}.", csv.display());
        }
        Commands::Assess { club, format } => {
            let benchmarks = BenchmarkTable::standard();
            let clubs = db::fetch_latest_metrics(&pool, club.as_deref()).await?;

            if clubs.is_empty() {
                println!("No metric snapshots found.");
                return Ok(());
            }

            let mut assessments: Vec<HealthAssessment> = clubs
                .iter()
                .map(|metrics| health::assess(metrics, &benchmarks))
                .collect();
            assessments.sort_by(|a, b| a.overall_score.cmp(&b.overall_score));

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&assessments)?);
                }
                OutputFormat::Text => {
                    println!("Clubs by overall health, lowest first:");
                    for assessment in &assessments {
                        println!(
                            "- {}: overall {} ({})",
                            assessment.club_name,
                            assessment.overall_score,
                            assessment.overall_band.as_str()
                        );
                        if club.is_some() {
                            for metric in &assessment.metrics {
                                println!(
                                    "  - {}: {:.1}{} vs target {:.1}{} [{}]",
                                    metric.metric.display_name(),
                                    metric.value,
                                    metric.metric.unit(),
                                    metric.benchmark,
                                    metric.metric.unit(),
                                    metric.label.as_str()
                                );
                            }
                        }
                    }
                }
            }
        }
        Commands::Recommend { club, format } => {
            let benchmarks = BenchmarkTable::standard();
            let clubs = db::fetch_latest_metrics(&pool, Some(&club)).await?;

            let metrics = match clubs.first() {
                Some(metrics) => metrics,
                None => {
                    println!("No metric snapshots found for {club}.");
                    return Ok(());
                }
            };

            let recommendations = recommend::recommend(metrics, &benchmarks);

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&recommendations)?);
                }
                OutputFormat::Text => {
                    if recommendations.is_empty() {
                        println!(
                            "{} is at or above benchmark on every tracked metric.",
                            metrics.club_name
                        );
                    } else {
                        for recommendation in &recommendations {
                            println!(
                                "[{}] {}",
                                recommendation.priority.as_str(),
                                recommendation.title
                            );
                            for tip in recommendation.tips {
                                println!("  - {tip}");
                            }
                        }
                    }
                }
            }
        }
        Commands::Report { club, out } => {
            let benchmarks = BenchmarkTable::standard();
            let clubs = db::fetch_latest_metrics(&pool, club.as_deref()).await?;
            let generated_on = chrono::Utc::now().date_naive();
            let rendered = report::build_report(club.as_deref(), &clubs, &benchmarks, generated_on);
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
