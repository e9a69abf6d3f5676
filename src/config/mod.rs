//! Configuration system
//!
//! Loads ~/.config/churros-graphs/config.yaml with support for:
//! - Remote API endpoint and operation namespace
//! - Group types, year-tier threshold and board office policy
//! - Graph output path, label toggle, image formats and layout engine
//! - Response cache location

mod graph_config;
mod sections;
pub mod validation;

pub use graph_config::GraphConfig;
pub use sections::{ApiConfig, BoardPolicyKind, CacheSettings, FilterConfig, OutputConfig};
pub use validation::{validate_config, validate_config_result, ValidationError};
