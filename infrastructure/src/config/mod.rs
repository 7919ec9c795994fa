//! Configuration file loading for gated-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `GATED_RAG_<SECTION>__<KEY>` (e.g. `GATED_RAG_LLM__MODEL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./gated-rag.toml`
//! 4. Global: `$XDG_CONFIG_HOME/gated-rag/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLlmConfig, FileLoggingConfig, FileRerankerConfig, FileRetrievalConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
