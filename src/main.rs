use anyhow::Context;
use clap::{Parser, Subcommand};

use runhub::config::Config;
use runhub::observability::init_observability;

#[derive(Parser)]
#[command(name = "runhub", version, about = "Running event registration frontend")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config).context("Failed to load configuration")?;

    let Commands::Serve { host, port } = cli
        .command
        .unwrap_or(Commands::Serve {
            host: None,
            port: None,
        });

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    init_observability("runhub", &config.observability.log_level)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, backend = %config.api.base_url, "Starting server");

    let app = runhub::create_app(config)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
