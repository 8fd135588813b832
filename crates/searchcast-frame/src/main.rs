//! SearchCast Frame - HTTP server for the Wikipedia search frame.
//!
//! Serves the frame pages and renders their images on demand.

use axum::Router;
use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use searchcast_frame::{AppState, Config, router};

/// SearchCast Frame - Wikipedia search as a Farcaster Frame.
#[derive(Parser, Debug)]
#[command(name = "searchcast-frame")]
#[command(about = "Farcaster Frame server for Wikipedia summaries", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// Listen address; overrides FRAME_BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,

    /// Public base URL used in frame meta tags; overrides FRAME_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    init_tracing();

    let mut config = Config::from_env()?;
    config.apply_overrides(args.bind, args.base_url)?;
    let bind_addr = config.bind_addr.clone();
    let base_url = config.base_url.clone();

    // Fonts are loaded here, once, before the first request
    let state = AppState::new(config)?;
    let app = with_middleware(router(state));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, base_url = %base_url, "starting frame server");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Request spans plus permissive CORS, so frame validators can post from
/// any origin.
fn with_middleware(app: Router) -> Router {
    app.layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "frame_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        }),
    )
    .layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
