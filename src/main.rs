use anyhow::Result;
use clap::Parser;
use geo_country::config::{self, LogConfig};
use geo_country::server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// IP to country resolution service.
#[derive(Parser)]
#[command(name = "geo-country")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CONFIG_PATH", default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load(&cli.config)?;

    init_tracing(&config.log);
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber; `RUST_LOG` takes precedence over `log.level`.
fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if log.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
