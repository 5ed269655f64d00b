use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use keystone_auth::config::proc_loader::file_to_config;
use keystone_auth::observability::metrics::get_metrics;
use keystone_auth::utils::logging;
use keystone_auth::utils::logging::LogLevel;
use keystone_auth::TokenAuthenticator;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "keystone-auth.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// print prometheus metrics to stderr after authenticating
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level.to_owned());

    // -------------------------------
    // 2. Resolve credentials
    // -------------------------------

    let credentials = service_config
        .credentials
        .resolve()
        .context("resolving credentials")?;

    // -------------------------------
    // 3. Authenticate
    // -------------------------------

    let authenticator = TokenAuthenticator::new(credentials, &service_config.settings);
    info!("Authenticating...");
    let auth = authenticator.authenticate().await?;
    println!("{}", serde_json::to_string(&auth)?);

    // -------------------------------
    // METRICS
    // -------------------------------

    if args.metrics || service_config.settings.metrics.is_enabled {
        eprintln!("{}", get_metrics().await.render()?);
    }

    Ok(())
}
