use clap::Parser;
use dns_relay_server::{bind_socket, CliOverrides, Config, ProxyServer, UdpUpstream};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;

#[derive(Parser)]
#[command(name = "dns-relay")]
#[command(version)]
#[command(about = "Minimal DNS forwarding proxy - relays UDP queries to a fixed upstream")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listening port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (IP or IP:PORT)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Upstream receive timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };

    let config = Config::load(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dns-relay v{}", env!("CARGO_PKG_VERSION"));

    let bind_addr = config.bind_addr()?;
    let upstream_addr = config.upstream_addr()?;
    info!(listen = %bind_addr, upstream = %upstream_addr, "Configuration loaded");

    let socket = bind_socket(bind_addr).await?;

    let upstream = UdpUpstream::new(upstream_addr, Duration::from_millis(config.upstream.timeout_ms));
    let proxy = ProxyServer::new(socket, upstream);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            signal_token.cancel();
        }
    });

    proxy.run(shutdown).await;

    info!("Server shutdown complete");
    Ok(())
}
