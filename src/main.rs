//! Git Release History - commit history of one repository as a JSON feed
//!
//! # Usage
//! ```bash
//! git-release-history /path/to/repository          # Serve on 127.0.0.1:8080
//! git-release-history . --host 0.0.0.0 --port 9000  # Custom bind address
//! GIT_REPO_PATH=/srv/repo git-release-history       # Path from environment
//! ```
//!
//! Endpoints:
//! - `GET /history` - filterable commit feed
//! - `GET /tags` - tag ref names

mod error;
mod git;
mod models;
mod routes;

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git::GitRepository;

/// Git Release History - serve a repository's commit history as JSON
#[derive(Parser)]
#[command(name = "git-release-history")]
#[command(about = "Serve the commit history of a git repository as JSON", long_about = None)]
struct Cli {
    /// Path inside the git repository to serve
    #[arg(value_name = "REPO_PATH", env = "GIT_REPO_PATH", default_value = ".")]
    repo_path: String,

    /// Address to bind to
    #[arg(long, env = "GRH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, env = "GRH_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The service is useless without a repository, so fail before binding.
    let repo = match GitRepository::open(&cli.repo_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", cli.repo_path);
            std::process::exit(1);
        }
    };

    let shared_repo = Arc::new(repo);
    let repo_path = shared_repo.path.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(shared_repo))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!("Serving history of {} on http://{}", repo_path, addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
