mod api_client;
mod auth;
mod candidates;
mod config;
mod console;
mod errors;
mod models;
mod resumes;
mod services;
mod state;
#[cfg(test)]
mod test_support;
mod timer;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::console::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments first so --help works without any environment
    let cli = Cli::parse();

    let config = Config::from_env()?;

    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting talent-console v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    console::run(cli, config).await
}
