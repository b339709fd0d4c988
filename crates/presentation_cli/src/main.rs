//! Storm CLI
//!
//! Current conditions and a five-day forecast from OpenWeatherMap.

#![allow(clippy::print_stdout)]

mod config;
mod dashboard;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use integration_openweather::{OpenWeatherClient, fetch_current, fetch_forecast};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::dashboard::{POPULAR_CITIES, load_dashboard, normalize_city};
use crate::render::{RenderOptions, render_current, render_forecast};

/// Storm CLI
#[derive(Parser)]
#[command(name = "storm-cli")]
#[command(author, version, about = "Storm weather dashboard CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./storm.toml if present)
    #[arg(short, long, env = "STORM_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Show temperatures in Fahrenheit as well
    #[arg(long)]
    fahrenheit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current conditions for a city
    Current {
        /// City name, e.g. "London" or "Paris,FR"
        city: String,
    },

    /// Show the daily forecast for a city
    Forecast {
        /// City name
        city: String,
    },

    /// Show current conditions followed by the forecast
    ///
    /// The forecast is only requested when the city was found.
    Show {
        /// City name
        city: String,
    },

    /// List popular cities to try
    Cities,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Validate the city and build a client from the loaded configuration
fn connect<'a>(
    config_path: Option<&Path>,
    input: &'a str,
) -> anyhow::Result<(OpenWeatherClient, &'a str)> {
    let Some(city) = normalize_city(input) else {
        anyhow::bail!("City name must not be empty");
    };

    let config = AppConfig::load(config_path)?;
    debug!(config = ?config.weather, "Configuration loaded");

    Ok((OpenWeatherClient::new(config.weather)?, city))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = RenderOptions {
        fahrenheit: cli.fahrenheit,
    };

    match &cli.command {
        Commands::Cities => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(POPULAR_CITIES)?);
            } else {
                println!("{}", POPULAR_CITIES.join("\n"));
            }
        },

        Commands::Current { city } => {
            let (client, city) = connect(cli.config.as_deref(), city)?;
            let Some(current) = fetch_current(&client, city).await else {
                println!("City not found");
                return Ok(ExitCode::FAILURE);
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&current)?);
            } else {
                println!("{}", render_current(&current, options));
            }
        },

        Commands::Forecast { city } => {
            let (client, city) = connect(cli.config.as_deref(), city)?;
            let Some(days) = fetch_forecast(&client, city).await else {
                println!("Forecast unavailable");
                return Ok(ExitCode::FAILURE);
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else if days.is_empty() {
                println!("No forecast data");
            } else {
                println!("{}", render_forecast(&days, options));
            }
        },

        Commands::Show { city } => {
            let (client, city) = connect(cli.config.as_deref(), city)?;
            let Some(dashboard) = load_dashboard(&client, city).await else {
                println!("City not found");
                return Ok(ExitCode::FAILURE);
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!("{}", render_current(&dashboard.current, options));
                println!();
                match &dashboard.forecast {
                    Some(days) => println!("{}", render_forecast(days, options)),
                    None => println!("Forecast unavailable"),
                }
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
