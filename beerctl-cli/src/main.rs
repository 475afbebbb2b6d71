//! beerctl CLI - beer catalog service
//!
//! Entry point for the `beerctl` binary. `beerctl serve` opens the SQLite
//! catalog and exposes it over the `/v1/beer` REST API.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::LogOptions;

#[derive(Parser, Debug)]
#[command(
    name = "beerctl",
    author,
    version,
    about = "Beer catalog REST API backed by SQLite"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let telemetry = tracing_setup::init(&LogOptions {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
    };

    telemetry.shutdown();
    result
}
