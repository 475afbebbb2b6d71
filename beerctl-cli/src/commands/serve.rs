//! HTTP server command for the beer catalog API
//!
//! Opens the database once, serves `/v1/beer` until shutdown, then closes it.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use beerctl_server::db::{create_pool, ensure_schema};
use beerctl_server::{run_server, ServerConfig, SqliteBeerRepo};

/// Database used when neither --database-url nor DATABASE_URL is set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/beer.db";

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:4000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(database = %args.database_url, "Starting beerctl server on {}", args.bind);

    let pool = create_pool(&args.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    ensure_schema(&pool)
        .await
        .context("Failed to prepare beer table")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    let served = run_server(Arc::new(SqliteBeerRepo::new(pool.clone())), config)
        .await
        .context("Server error");

    pool.close().await;
    tracing::info!("Database closed");

    served
}
