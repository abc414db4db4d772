//! CLI entry point for the place safety rater.
//!
//! Provides subcommands for serving the HTTP API, looking up place
//! suggestions, and analyzing a single place from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use place_safety_rater::analyzers::aggregate::MetricsAggregator;
use place_safety_rater::analyzers::analyzer::analyze_place;
use place_safety_rater::analyzers::time_segment::TimeSegment;
use place_safety_rater::config::AppConfig;
use place_safety_rater::error::AnalysisError;
use place_safety_rater::fetch::{BasicClient, auth::UrlParam};
use place_safety_rater::infra::google::GooglePlacesClient;
use place_safety_rater::output::{AssessmentRecord, append_record, print_json, print_pretty};
use place_safety_rater::server::{self, AnalyzeResponse};
use place_safety_rater::services::place_data::PlaceDataProvider;
use place_safety_rater::telemetry;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

type GooglePlaces = GooglePlacesClient<UrlParam<BasicClient>>;

#[derive(Parser)]
#[command(name = "place_safety_rater")]
#[command(about = "Estimate how safe a place is from its nearby points of interest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the /suggestions and /analyze HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
    /// Print autocomplete suggestions for a place name
    Suggest {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Score a place by its provider place id
    Analyze {
        #[arg(value_name = "PLACE_ID")]
        place_id: String,

        /// Time segment label or alias (e.g. "Night (9PM - 12AM)", "after-midnight").
        /// Defaults to the current local time window.
        #[arg(short, long)]
        time: Option<String>,

        /// CSV file to append the result to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = telemetry::init()?;

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let aggregator = build_aggregator(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            server::serve(Arc::new(aggregator), addr).await?;
        }
        Commands::Suggest { text } => {
            let suggestions = aggregator.provider().autocomplete(&text).await?;
            info!(count = suggestions.len(), "Suggestions fetched");
            print_json(&suggestions)?;
        }
        Commands::Analyze {
            place_id,
            time,
            output,
        } => {
            let segment = time
                .as_deref()
                .map(TimeSegment::from_label)
                .unwrap_or_else(TimeSegment::now);

            match analyze_place(&aggregator, &place_id, segment).await {
                Ok(analysis) => {
                    print_pretty(&analysis);
                    print_json(&analysis.assessment)?;

                    if let Some(path) = output {
                        append_record(&path, &AssessmentRecord::from_analysis(&analysis))?;
                        info!(path = %path, "Result appended");
                    }
                }
                Err(AnalysisError::NotFound(_)) => print_json(&AnalyzeResponse::no_data())?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Wires the Places client (API key as a query parameter) into an aggregator.
fn build_aggregator(config: &AppConfig) -> Result<MetricsAggregator<GooglePlaces>> {
    let http = BasicClient::with_timeouts(config.http_timeout, config.http_connect_timeout)?;
    let places = GooglePlacesClient::new(
        UrlParam::places_key(http, config.api_key.clone()),
        config.places_base_url.clone(),
    );

    info!(
        base_url = %config.places_base_url,
        radius_meters = config.radius_meters,
        "Places provider configured"
    );

    Ok(MetricsAggregator::new(places).with_radius(config.radius_meters))
}
