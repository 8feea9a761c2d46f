//! `taskinbox-api` server entry point.

use anyhow::Context;
use clap::Parser;
use taskinbox_api::ServerConfig;
use taskinbox_core::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_level(), config.log_dir.as_deref())
        .context("initialize logging failed")?;

    taskinbox_api::run(&config).await
}
