//! # precip
//!
//! Command-line front end for the precipitation prediction engine.

use chrono::Datelike;
use clap::{Parser, Subcommand};
use precip_forecast::config::EngineConfig;
use precip_forecast::core::{ObservationStore, PredictionResponse};
use precip_forecast::ingest::read_csv_file;
use precip_forecast::models::{contrast, Predictor};
use precip_forecast::series::recent_history;
use precip_forecast::stations::StationRegistry;
use precip_forecast::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "precip")]
#[command(about = "Monthly precipitation prediction", long_about = None)]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict precipitation for a month at a station
    Predict {
        /// Observation export (CSV)
        #[arg(short, long)]
        data: PathBuf,

        /// Station name
        #[arg(short, long)]
        location: String,

        /// Month name, abbreviation or number
        #[arg(short, long)]
        month: String,

        /// Target year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the recent readings of a station
    History {
        #[arg(short, long)]
        data: PathBuf,

        #[arg(short, long)]
        location: String,

        /// Number of distinct years shown (overrides the configuration)
        #[arg(long)]
        years: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// List the stations found in the data
    Stations {
        #[arg(short, long)]
        data: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn load_store(path: &Path) -> Result<ObservationStore> {
    let batch = read_csv_file(path)?;
    let mut store = ObservationStore::new();
    let summary = store.import(&batch);
    tracing::info!(
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        "observations loaded"
    );
    Ok(store)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Predict {
            data,
            location,
            month,
            year,
            json,
        } => {
            let store = load_store(&data)?;
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let observations = store.observations_for(&location);

            let predictor = Predictor::new(config.predictor);
            let forecast = predictor.predict(&observations, month.as_str(), year, &location);
            let contrast = contrast(&observations, &month, year, &location, forecast.estimate);
            let response = PredictionResponse::new(&forecast, &contrast);

            if json {
                println!("{}", to_json(&response));
            } else {
                let report = &response.prediction;
                match report.estimate {
                    Some(mm) => println!(
                        "{} {} {}: {:.2} mm, {:.2}% chance of rain, {} {}",
                        location, month, year, mm, report.probability, report.intensity, report.emoji
                    ),
                    None => println!(
                        "{} {} {}: {} {}",
                        location, month, year, report.intensity, report.emoji
                    ),
                }
                if let (Some(real), Some(error)) = (response.contrast.observed, response.contrast.error) {
                    println!("recorded: {:.2} mm (error {:.2} mm)", real, error);
                }
            }
        }

        Commands::History {
            data,
            location,
            years,
            json,
        } => {
            let store = load_store(&data)?;
            let years = years.unwrap_or(config.history_years);
            let history = recent_history(store.observations(), &location, years);
            if json {
                println!("{}", to_json(&history));
            } else {
                for point in &history {
                    match point.value {
                        Some(v) => println!("{:<8} {:>8.1}", point.label, v),
                        None => println!("{:<8} {:>8}", point.label, "-"),
                    }
                }
            }
        }

        Commands::Stations { data, json } => {
            let store = load_store(&data)?;
            let mut registry = StationRegistry::new();
            registry.populate(&store);
            if json {
                println!("{}", to_json(&registry.stations()));
            } else {
                for station in registry.stations() {
                    let coords = match (station.latitude, station.longitude) {
                        (Some(lat), Some(lng)) => format!("{:.4}, {:.4}", lat, lng),
                        _ => "unknown".to_string(),
                    };
                    println!("{:>3}  {:<45} {:<20} {}", station.id, station.name, station.department, coords);
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "precip_forecast=info,precip=info".into()),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
