use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

pub(crate) mod auth;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod models;
pub(crate) mod server;
pub(crate) mod storage;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();
    server::run_all(&config).await?;

    Ok(())
}
