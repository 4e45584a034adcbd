use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use skt_client::domain::{ProviderTime, TimeError};
use skt_client::geo::Wgs84;
use skt_client::skt::{PointRef, SktClient, SktConfig, SktError, TripQuery};

#[derive(Parser)]
#[command(name = "skt", version, about = "Query the Skånetrafiken journey planner")]
struct Cli {
    /// API base URL (also read from SKT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search stations, addresses and places by name.
    Stations {
        query: String,
    },

    /// Stations near a WGS84 position.
    Nearby {
        lat: f64,
        lon: f64,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Search trips between two points given as name|id|type.
    Trips {
        #[arg(long)]
        from: PointRef,
        #[arg(long)]
        to: PointRef,
        /// Local departure time, e.g. 2024-03-15T08:30
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDateTime>,
        #[arg(long)]
        max_results: Option<u32>,
    },
}

fn parse_date(s: &str) -> Result<NaiveDateTime, TimeError> {
    ProviderTime::parse(s).map(|t| t.to_datetime())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), SktError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SktError::Json {
        message: e.to_string(),
        body: None,
    })?;
    println!("{json}");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), SktError> {
    let mut config = SktConfig::new().with_timeout(cli.timeout);
    if let Some(url) = cli.base_url.or_else(|| std::env::var("SKT_BASE_URL").ok()) {
        config = config.with_base_url(url);
    }
    let client = SktClient::new(config)?;

    match cli.command {
        Command::Stations { query } => print_json(&client.stations(&query).await?),
        Command::Nearby { lat, lon, radius } => {
            print_json(&client.nearby_stations(Wgs84::new(lat, lon), radius).await?)
        }
        Command::Trips {
            from,
            to,
            date,
            max_results,
        } => {
            let mut query = TripQuery::new(from, to);
            query.date = date;
            query.max_results = max_results;
            print_json(&client.trips(&query).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
