//! Domain models for the pipeline cache.

pub mod artifact;
pub mod config;
pub mod pipeline;
pub mod status;
pub mod sub_key;
pub mod value;

pub use artifact::Artifact;
pub use config::{CachePolicyConfig, Config, LoggingConfig, StoreBackend, StoreConfig};
pub use pipeline::PipelineId;
pub use status::ExecutionStatus;
pub use sub_key::SubKey;
pub use value::CacheValue;
