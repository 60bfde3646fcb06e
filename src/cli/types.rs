//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{PipelineId, SubKey};

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "pipeline-cache")]
#[command(about = "Inspect and edit cached pipeline execution artifacts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .pipeline-cache/config.yaml)
    #[arg(short, long, global = true, env = "PIPELINE_CACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the entry store answers
    Ping,

    /// Print one cached artifact
    Get {
        /// Pipeline UUID
        pipeline_id: PipelineId,
        /// Sub-key: status, run-output, compile-output or graph
        sub_key: SubKey,
    },

    /// Cache an artifact and restart the entry's retention window
    ///
    /// With the memory backend the value only lives as long as this process.
    Set {
        /// Pipeline UUID
        pipeline_id: PipelineId,
        /// Sub-key: status, run-output, compile-output or graph
        sub_key: SubKey,
        /// Value; statuses accept names like FINISHED or numeric codes
        value: String,
    },

    /// Change how long an existing entry is kept
    Expire {
        /// Pipeline UUID
        pipeline_id: PipelineId,
        /// New time-to-live in seconds
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        seconds: u64,
    },

    /// Show every artifact cached for a pipeline
    Show {
        /// Pipeline UUID
        pipeline_id: PipelineId,
    },
}
