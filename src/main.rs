//! average.name edge responder.
//!
//! Startup order: tracing, config (file + environment), TCP bind, optional
//! reachability self-checks, then serve until ctrl-c. A port that is already
//! bound is fatal: we log and exit rather than retry, and leave restarts to
//! the supervisor.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avgname_edge::config;
use avgname_edge::{EdgeConfig, HttpServer};

#[derive(Parser)]
#[command(about = "HTTP edge responder for average.name")]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avgname_edge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config: EdgeConfig = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        content_root = %config.content.root.display(),
        self_check = config.self_check.enabled,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(config.listener.bind_address()).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(
                bind_address = %config.listener.bind_address(),
                error = %err,
                "failed to bind listener"
            );
            return ExitCode::FAILURE;
        }
    };

    if config.self_check.enabled {
        avgname_edge::selfcheck::run().await;
    }

    let server = HttpServer::new(&config);
    if let Err(err) = server.run(listener).await {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
