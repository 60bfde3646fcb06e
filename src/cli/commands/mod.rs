//! CLI command implementations.

pub mod entry;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::Commands;
use crate::domain::models::{Config, StoreBackend};
use crate::services::build_cache;

#[derive(Debug, Serialize)]
pub struct PingOutput {
    pub backend: StoreBackend,
    pub address: String,
    pub reachable: bool,
}

impl CommandOutput for PingOutput {
    fn to_human(&self) -> String {
        match self.backend {
            StoreBackend::Memory => "PONG (in-memory store)".to_string(),
            StoreBackend::Redis => format!("PONG from {}", self.address),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Connect to the configured store and run one command against it.
pub async fn execute(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    let cache = build_cache(config)
        .await
        .context("Failed to connect to the entry store")?;

    match command {
        Commands::Ping => {
            cache.ping().await.context("Entry store did not answer PING")?;
            let out = PingOutput {
                backend: config.store.backend,
                address: config.store.address.clone(),
                reachable: true,
            };
            output(&out, json_mode);
        }
        Commands::Get { pipeline_id, sub_key } => {
            entry::get(&cache, pipeline_id, sub_key, json_mode).await?;
        }
        Commands::Set {
            pipeline_id,
            sub_key,
            value,
        } => {
            entry::set(&cache, pipeline_id, sub_key, &value, json_mode).await?;
        }
        Commands::Expire { pipeline_id, seconds } => {
            entry::expire(&cache, pipeline_id, seconds, json_mode).await?;
        }
        Commands::Show { pipeline_id } => {
            entry::show(&cache, pipeline_id, json_mode).await?;
        }
    }

    Ok(())
}
