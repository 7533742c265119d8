use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verbomed_server::{create_app, VerbomedServer};

/// Verbomed Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "verbomed-server")]
#[command(about = "Voice journal backend API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Starting Verbomed Engine HTTP Server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Bind address: {}:{}", args.host, args.port);

    let server = VerbomedServer::from_env()
        .await
        .context("Server initialization failed; check your .env file and environment variables")?;

    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", args.host, args.port))?;

    info!(
        "Verbomed Engine server running on http://{}:{}",
        args.host, args.port
    );
    info!(
        "Health check available at: http://{}:{}/health",
        args.host, args.port
    );
    info!(
        "API v1 available at: http://{}:{}/api/v1",
        args.host, args.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let is_development =
        env::var("VERBOMED_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("verbomed_server={level},tower_http=info,sqlx=warn,reqwest=info").into()
    });

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .init();
    }
}
