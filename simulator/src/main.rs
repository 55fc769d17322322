use anyhow::Context;
use clap::Parser;
use slots_execution::{SeededEntropy, ServerSeed};
use slots_simulator::{Api, RateLimit, Simulator};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Hex-encoded 32-byte server seed for roll randomness.
    #[arg(short, long)]
    seed: Option<String>,

    /// Append-only journal replayed on start.
    #[arg(short, long)]
    journal: Option<PathBuf>,

    #[arg(long, default_value_t = 50)]
    rate_per_second: u64,

    #[arg(long, default_value_t = 100)]
    burst: u32,

    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    // Parse seed
    let entropy = match &args.seed {
        Some(seed) => {
            let bytes = commonware_utils::from_hex(seed).context("invalid seed hex format")?;
            let seed: ServerSeed = bytes.try_into().map_err(|bytes: Vec<u8>| {
                anyhow::anyhow!("seed must be 32 bytes, got {}", bytes.len())
            })?;
            SeededEntropy::new(seed)
        }
        None => {
            warn!("no seed provided, rolls cannot be replayed after restart");
            SeededEntropy::random()
        }
    };

    let simulator = match &args.journal {
        Some(path) => Simulator::with_journal(entropy, path)
            .await
            .with_context(|| format!("failed to open journal {}", path.display()))?,
        None => Simulator::new(entropy),
    };
    let api = Api::new(Arc::new(simulator)).with_rate_limit(RateLimit {
        per_second: args.rate_per_second,
        burst: args.burst,
    });
    let app = api.router()?;

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("axum server error")?;

    Ok(())
}
