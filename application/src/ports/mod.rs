//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod collaborators;
pub mod llm_gateway;
pub mod pipeline_logger;
pub mod progress;
