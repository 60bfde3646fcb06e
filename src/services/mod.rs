//! Cache services built on the domain ports.

pub mod cache_factory;
pub mod pipeline_cache;

pub use cache_factory::{build_cache, DynPipelineCache};
pub use pipeline_cache::{PipelineCache, DEFAULT_RETENTION};
