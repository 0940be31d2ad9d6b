//! Demo server for the deep link login redirect middleware.
//!
//! # Usage
//!
//! ```bash
//! # Start the demo server
//! cargo run
//!
//! # Validate configuration and exit
//! cargo run -- --check
//!
//! # Override the bind address
//! cargo run -- --listen 127.0.0.1:8080
//! ```
//!
//! See [`deep_link::config`] for the environment variables.

use anyhow::Result;
use clap::Parser;
use deep_link::config::Config;
use tracing_subscriber::EnvFilter;

/// Deep link login redirect demo server.
#[derive(Parser)]
#[command(name = "deep-link")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(short, long)]
    listen: Option<String>,

    /// Validate configuration and exit without starting the server
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    if cli.check {
        deep_link::server::deep_link_service(&config)?;
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    deep_link::server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
