//! `Taskboard` task API server -- in-memory REST backend.
//!
//! An axum server exposing the task collection at `/tasks`. Tasks live in
//! memory for the lifetime of the process and can be preloaded from a JSON
//! seed file.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:3000
//! cargo run --bin taskboard-server
//!
//! # Custom address and seed data
//! cargo run --bin taskboard-server -- --bind 0.0.0.0:8080 --seed tasks.json
//!
//! # Or via environment variable
//! TASKBOARD_SERVER_ADDR=127.0.0.1:8080 cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::api;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::store::{self, TaskRepository};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let repository = match config.seed_file.as_deref() {
        Some(path) => match store::load_seed_file(path) {
            Ok(tasks) => {
                tracing::info!(path = %path.display(), count = tasks.len(), "loaded seed tasks");
                TaskRepository::with_tasks(tasks)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load seed file");
                std::process::exit(1);
            }
        },
        None => TaskRepository::new(),
    };

    tracing::info!(addr = %config.bind_addr, "starting taskboard server");

    match api::start_server_with_repository(&config.bind_addr, Arc::new(repository)).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task api listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task api server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task api server");
            std::process::exit(1);
        }
    }
}
