//! CLI entry point for the GTFS route explorer.
//!
//! Provides the overview and route explorer pages as subcommands, an
//! interactive session that keeps the route/trip data loaded between
//! selections, and raw access to the four API fetches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gtfs_route_explorer::{
    config::ApiConfig,
    dashboard::Dashboard,
    error::DashboardError,
    fetch::{BasicClient, GtfsApi, HttpClient, auth::ApiKey},
    persist::CsvCache,
    presentation::{DashboardRenderer, TextRenderer},
};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gtfs_route_explorer")]
#[command(about = "Explore Metlink GTFS routes, trips, shapes and stops", long_about = None)]
struct Cli {
    /// Override the API base URL (defaults to METLINK_BASE_URL or the Metlink v1 API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory fetched records are dumped to as CSV
    #[arg(long, global = true, default_value = ".")]
    cache_dir: PathBuf,

    /// Do not write CSV dumps of fetched records
    #[arg(long, global = true, default_value_t = false)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Network-wide metrics and the busiest routes
    Overview {
        /// Also list the trip count of every route
        #[arg(short, long, default_value_t = false)]
        all: bool,
    },
    /// List the routes that can be explored
    Routes,
    /// Summary, shapes and stops of a single route
    Explore {
        /// Route id or route label
        #[arg(value_name = "ROUTE")]
        route: String,

        /// Also list every trip of the route
        #[arg(short, long, default_value_t = false)]
        trips: bool,

        /// Write the route map as GeoJSON to this file
        #[arg(short, long, value_name = "FILE")]
        map: Option<PathBuf>,
    },
    /// Fetch raw records from the API
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },
    /// Keep the session open and explore routes one after another
    Interactive,
}

#[derive(Subcommand)]
enum FetchTarget {
    Routes,
    Trips,
    Shape { shape_id: String },
    Stops { route_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/gtfs_route_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gtfs_route_explorer.log"));

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
    let api = build_api(&cli)?;

    match cli.command {
        Commands::Overview { all } => {
            let mut dashboard = Dashboard::new(api);
            let view = dashboard.overview().await?;
            stdout_renderer(all).overview(&view)?;
        }
        Commands::Routes => {
            let mut dashboard = Dashboard::new(api);
            let options = dashboard.route_options().await?;
            info!(count = options.len(), "Routes with trips");
            stdout_renderer(false).route_options(&options)?;
        }
        Commands::Explore { route, trips, map } => {
            let mut dashboard = Dashboard::new(api);
            let view = dashboard.explore(&route).await?;
            stdout_renderer(trips).route_explorer(&view)?;

            if let Some(path) = map {
                write_map(&path, &view.map.to_geojson().to_string())?;
            }
        }
        Commands::Fetch { target } => fetch(&api, target).await?,
        Commands::Interactive => interactive(Dashboard::new(api)).await?,
    }

    Ok(())
}

fn build_api(cli: &Cli) -> Result<GtfsApi<ApiKey<BasicClient>>> {
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    let client = ApiKey::new(BasicClient::new()?, &config.api_key_header, &config.api_key)?;
    let api = GtfsApi::new(client, &config.base_url)
        .with_context(|| format!("invalid base url '{}'", config.base_url))?;

    if cli.no_cache {
        Ok(api)
    } else {
        info!(dir = %cli.cache_dir.display(), "Caching fetched records as CSV");
        Ok(api.with_cache(CsvCache::new(&cli.cache_dir)))
    }
}

fn stdout_renderer(expanded: bool) -> TextRenderer<std::io::Stdout> {
    TextRenderer::new(std::io::stdout()).expanded(expanded)
}

fn write_map(path: &Path, geojson: &str) -> Result<()> {
    std::fs::write(path, geojson).with_context(|| format!("writing map to {}", path.display()))?;
    info!(path = %path.display(), "Map saved");
    Ok(())
}

/// Runs one of the raw fetches and reports what came back.
#[tracing::instrument(skip_all)]
async fn fetch<C: HttpClient>(api: &GtfsApi<C>, target: FetchTarget) -> Result<()> {
    match target {
        FetchTarget::Routes => {
            let routes = api.fetch_routes().await?;
            info!(count = routes.len(), "Routes fetched");
        }
        FetchTarget::Trips => {
            let trips = api.fetch_trips().await?;
            info!(count = trips.len(), "Trips fetched");
        }
        FetchTarget::Shape { shape_id } => {
            let points = api.fetch_shape(&shape_id).await?;
            info!(shape_id = %shape_id, count = points.len(), "Shape fetched");
        }
        FetchTarget::Stops { route_id } => {
            let stops = api.fetch_stops(&route_id).await?;
            info!(route_id = %route_id, count = stops.len(), "Stops fetched");
        }
    }
    Ok(())
}

/// Reads selections from stdin until EOF or `quit`.
///
/// Routes and trips are fetched once and reused until `reload`; every route
/// selection fetches its shapes and stops again.
async fn interactive<C: HttpClient>(mut dashboard: Dashboard<C>) -> Result<()> {
    let mut renderer = stdout_renderer(false);
    renderer.overview(&dashboard.overview().await?)?;

    let stdin = std::io::stdin();
    loop {
        print!("\nroute id or label (routes, overview, reload, quit)> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "reload" => {
                dashboard.reset();
                renderer.overview(&dashboard.overview().await?)?;
            }
            "overview" => renderer.overview(&dashboard.overview().await?)?,
            "routes" => renderer.route_options(&dashboard.route_options().await?)?,
            selection => match dashboard.explore(selection).await {
                Ok(view) => renderer.route_explorer(&view)?,
                Err(DashboardError::UnknownRoute(route)) => {
                    warn!(route = %route, "Unknown route");
                }
                Err(e) => return Err(e.into()),
            },
        }
    }

    Ok(())
}
