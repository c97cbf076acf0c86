//! CLI entry point for the city indicator rater.
//!
//! Loads a cohort of cities (built-in catalog, CSV/JSON file or URL) and
//! prints the country summary, cohort extrema, per-city standings or the
//! chart data for a single city.

use anyhow::Result;
use city_indicator_rater::analyzers::aggregate::Alignment;
use city_indicator_rater::analyzers::analyzer::{chart_for, extrema, standings, summarize};
use city_indicator_rater::analyzers::ranking::RankingStrategy;
use city_indicator_rater::analyzers::summary::ValueOrdering;
use city_indicator_rater::analyzers::utility::non_numeric_values;
use city_indicator_rater::catalog::{ICONS, icon_for};
use city_indicator_rater::config::EngineConfig;
use city_indicator_rater::error::EngineError;
use city_indicator_rater::loader::{BUILTIN_SOURCE, load_cohort};
use city_indicator_rater::model::Cohort;
use city_indicator_rater::output::{print_json, write_csv};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "city_indicator_rater")]
#[command(
    about = "Compare urban sustainability indicators across a cohort of cities",
    long_about = None
)]
struct Cli {
    /// Cohort source: "builtin", a CSV/JSON file, or an http(s) URL
    #[arg(long, global = true, default_value = BUILTIN_SOURCE)]
    source: String,

    /// JSON engine config (falls back to $INDICATOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean indicator value per city, sorted
    Summary {
        /// Sort by numeric value instead of by decimal text
        #[arg(long)]
        numeric: bool,

        /// Also write the sorted rows to this CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<String>,
    },
    /// Absolute maximum and per-indicator minimum/maximum
    Extrema {
        /// Match indicators by name instead of position
        #[arg(long)]
        by_name: bool,
    },
    /// Rank and standing of every city against the cohort average
    Rank {
        /// Tie handling
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
    },
    /// Indicator values of one city, as drawn in the detail chart
    Chart {
        /// City name, exactly as it appears in the cohort
        #[arg(long)]
        city: String,
    },
    /// Indicator to icon table
    Icons,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    FirstOccurrence,
    Dense,
    Fractional,
}

impl From<Strategy> for RankingStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::FirstOccurrence => RankingStrategy::FirstOccurrence,
            Strategy::Dense => RankingStrategy::Dense,
            Strategy::Fractional => RankingStrategy::Fractional,
        }
    }
}

#[derive(Serialize)]
struct IconChartPoint<'a> {
    name: &'a str,
    value: &'a str,
    icon: Option<&'static str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/city_indicator_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("city_indicator_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let mut config = EngineConfig::resolve(cli.config.as_deref())?;

    if let Commands::Icons = cli.command {
        return show_icons(cli.format);
    }

    let cohort = load_cohort(&cli.source).await?;
    warn_non_numeric(&cohort);

    match cli.command {
        Commands::Summary { numeric, csv } => {
            if numeric {
                config.value_ordering = ValueOrdering::Numeric;
            }
            let report = summarize(&cohort, &config);

            if let Some(path) = csv {
                write_csv(&path, &report.cities)?;
                info!(path = %path, rows = report.cities.len(), "Summary written");
            }

            match cli.format {
                Format::Json => print_json(&report)?,
                Format::Pretty => {
                    for city in &report.cities {
                        println!("{:<36} {}", city.name, city.value);
                    }
                }
            }
        }
        Commands::Extrema { by_name } => {
            if by_name {
                config.alignment = Alignment::ByName;
            }
            match extrema(&cohort, &config) {
                Ok(report) => match cli.format {
                    Format::Json => print_json(&report)?,
                    Format::Pretty => {
                        println!("absolute max: {}", report.absolute_max);
                        for ind in &report.indicators {
                            println!("{:<16} min {:<14} max {}", ind.name, ind.min, ind.max);
                        }
                    }
                },
                Err(e) => no_data("extrema", &e),
            }
        }
        Commands::Rank { strategy } => {
            if let Some(s) = strategy {
                config.ranking = s.into();
            }
            match standings(&cohort, &config) {
                Ok(report) => match cli.format {
                    Format::Json => print_json(&report)?,
                    Format::Pretty => {
                        println!("cohort average: {}", report.cohort_average);
                        for city in &report.cities {
                            println!(
                                "{:<36} score {:<10} rank {:<10} {}",
                                city.name,
                                city.score,
                                city.rank_label(),
                                city.standing
                            );
                        }
                    }
                },
                Err(e) => no_data("rank", &e),
            }
        }
        Commands::Chart { city } => match chart_for(&cohort, &city, &config) {
            Some(points) => {
                let points: Vec<_> = points
                    .iter()
                    .map(|p| IconChartPoint {
                        name: &p.name,
                        value: &p.value,
                        icon: icon_for(&p.name),
                    })
                    .collect();
                match cli.format {
                    Format::Json => print_json(&points)?,
                    Format::Pretty => {
                        for p in &points {
                            println!("{:<16} {:<14} {}", p.name, p.value, p.icon.unwrap_or("-"));
                        }
                    }
                }
            }
            None => {
                warn!(city = %city, "City not in cohort");
                println!("No data");
            }
        },
        Commands::Icons => {}
    }

    Ok(())
}

fn show_icons(format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let map: serde_json::Map<String, serde_json::Value> = ICONS
                .iter()
                .map(|(name, path)| (name.to_string(), serde_json::Value::from(*path)))
                .collect();
            print_json(&map)?;
        }
        Format::Pretty => {
            for (name, path) in ICONS {
                println!("{:<16} {}", name, path);
            }
        }
    }
    Ok(())
}

/// Surfaces unparseable readings; they still flow through as NaN.
fn warn_non_numeric(cohort: &Cohort) {
    for bad in non_numeric_values(cohort) {
        warn!(
            city = %bad.city,
            indicator = %bad.indicator,
            raw = %bad.raw,
            "Non-numeric indicator value"
        );
    }
}

fn no_data(operation: &str, e: &EngineError) {
    error!(operation, error = %e, "Aggregation failed");
    println!("No data");
}
