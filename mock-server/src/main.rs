use std::net::SocketAddr;

use clap::Parser;
use mock_server::Store;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mock-server", about = "In-memory inventory backend for local development", version)]
struct Args {
    #[arg(
        long,
        env = "INVENTORY_BIND",
        value_name = "ADDR",
        default_value = "127.0.0.1:3000",
        help = "Address to listen on"
    )]
    bind: SocketAddr,

    #[arg(long, help = "Start with a few sample products")]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();
    let store = if args.seed { Store::with_samples() } else { Store::default() };
    let listener = TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, products = store.len(), "listening");
    mock_server::serve(listener, store).await?;
    Ok(())
}
