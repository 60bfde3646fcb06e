//! Cache entry CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::errors::CacheError;
use crate::domain::models::{CacheValue, PipelineId, SubKey};
use crate::domain::ports::ExecutionCache;
use crate::services::DynPipelineCache;

#[derive(Debug, Serialize)]
pub struct ValueOutput {
    pub pipeline_id: String,
    pub sub_key: String,
    pub value: String,
}

impl ValueOutput {
    fn new(pipeline_id: PipelineId, value: &CacheValue) -> Self {
        let text = match value {
            CacheValue::Status(status) => status.as_str(),
            other => other.as_text().unwrap_or_default(),
        };
        Self {
            pipeline_id: pipeline_id.to_string(),
            sub_key: value.sub_key().to_string(),
            value: text.to_string(),
        }
    }
}

impl CommandOutput for ValueOutput {
    fn to_human(&self) -> String {
        self.value.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct EntryActionOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for EntryActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct EntryField {
    pub sub_key: String,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntryOutput {
    pub pipeline_id: String,
    pub ttl_secs: Option<u64>,
    pub fields: Vec<EntryField>,
}

impl CommandOutput for EntryOutput {
    fn to_human(&self) -> String {
        if self.fields.iter().all(|f| f.value.is_none()) {
            return format!("No cached artifacts for pipeline {}.", self.pipeline_id);
        }

        let mut table = list_table(&["sub-key", "value"]);
        for field in &self.fields {
            let shown = field
                .value
                .as_deref()
                .map_or_else(|| "-".to_string(), |v| truncate(&v.replace('\n', "\\n"), 60));
            table.add_row(vec![field.sub_key.clone(), shown]);
        }

        let ttl = self
            .ttl_secs
            .map_or_else(|| "no expiry".to_string(), |secs| format!("expires in {secs}s"));
        format!("Pipeline {} ({ttl}):\n{table}", self.pipeline_id)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn get(cache: &DynPipelineCache, pipeline_id: PipelineId, sub_key: SubKey, json_mode: bool) -> Result<()> {
    let value = cache
        .get_value(pipeline_id, sub_key)
        .await
        .with_context(|| format!("Failed to read {sub_key} for pipeline {pipeline_id}"))?;

    output(&ValueOutput::new(pipeline_id, &value), json_mode);
    Ok(())
}

pub async fn set(
    cache: &DynPipelineCache,
    pipeline_id: PipelineId,
    sub_key: SubKey,
    raw: &str,
    json_mode: bool,
) -> Result<()> {
    let value = CacheValue::from_input(sub_key, raw)?;
    cache
        .set_value(pipeline_id, value)
        .await
        .with_context(|| format!("Failed to cache {sub_key} for pipeline {pipeline_id}"))?;

    let out = EntryActionOutput {
        success: true,
        message: format!(
            "Cached {sub_key} for pipeline {pipeline_id} (expires in {}s)",
            cache.retention().as_secs()
        ),
    };
    output(&out, json_mode);
    Ok(())
}

pub async fn expire(cache: &DynPipelineCache, pipeline_id: PipelineId, seconds: u64, json_mode: bool) -> Result<()> {
    cache
        .set_expiration_time(pipeline_id, Duration::from_secs(seconds))
        .await
        .with_context(|| format!("Failed to update expiration for pipeline {pipeline_id}"))?;

    let out = EntryActionOutput {
        success: true,
        message: format!("Pipeline {pipeline_id} now expires in {seconds}s"),
    };
    output(&out, json_mode);
    Ok(())
}

pub async fn show(cache: &DynPipelineCache, pipeline_id: PipelineId, json_mode: bool) -> Result<()> {
    let out = collect_entry(cache, pipeline_id).await?;
    output(&out, json_mode);
    Ok(())
}

/// Read every sub-key of an entry; missing ones are reported as empty.
pub async fn collect_entry(cache: &DynPipelineCache, pipeline_id: PipelineId) -> Result<EntryOutput> {
    let mut fields = Vec::with_capacity(SubKey::ALL.len());
    for sub_key in SubKey::ALL {
        let value = match cache.get_value(pipeline_id, sub_key).await {
            Ok(value) => Some(ValueOutput::new(pipeline_id, &value).to_human()),
            Err(CacheError::ValueNotFound { .. }) => None,
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {sub_key} for pipeline {pipeline_id}"))
            }
        };
        fields.push(EntryField {
            sub_key: sub_key.to_string(),
            value,
        });
    }

    let ttl = cache.time_to_live(pipeline_id).await?;
    Ok(EntryOutput {
        pipeline_id: pipeline_id.to_string(),
        ttl_secs: ttl.map(|d| d.as_secs()),
        fields,
    })
}
