//! Configuration validation
//!
//! Validates a GraphConfig before any query is issued:
//! - At least one group type to query
//! - An http(s) endpoint and a usable operation namespace
//! - Output formats and layout engine Graphviz understands

use super::graph_config::GraphConfig;
use crate::api::is_graphql_name;
use crate::ChurrosGraphsError;
use std::collections::HashSet;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a configuration, collecting every problem found
pub fn validate_config(config: &GraphConfig) -> ValidationResult {
    let mut errors = Vec::new();

    // API
    let endpoint = &config.api.endpoint;
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(ValidationError::new(
            "api.endpoint",
            format!("Invalid endpoint URL: {}", endpoint),
        ));
    }

    if !is_graphql_name(&config.api.operation_namespace) {
        errors.push(ValidationError::new(
            "api.operation_namespace",
            format!(
                "'{}' is not a valid GraphQL name",
                config.api.operation_namespace
            ),
        ));
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "api.timeout_secs",
            "Timeout must be greater than 0",
        ));
    }

    // Filter
    if config.filter.group_types.is_empty() {
        errors.push(ValidationError::new(
            "filter.group_types",
            "At least one group type must be listed",
        ));
    }

    let mut seen_types = HashSet::new();
    for group_type in &config.filter.group_types {
        if group_type.trim().is_empty() {
            errors.push(ValidationError::new(
                "filter.group_types",
                "Group type cannot be empty",
            ));
        } else if !seen_types.insert(group_type) {
            errors.push(ValidationError::new(
                "filter.group_types",
                format!("Duplicate group type: {}", group_type),
            ));
        }
    }

    // Output
    if config.output.formats.is_empty() {
        errors.push(ValidationError::new(
            "output.formats",
            "At least one output format must be listed",
        ));
    }

    for format in &config.output.formats {
        if let Err(e) = format.parse::<graphviz::OutputFormat>() {
            errors.push(ValidationError::new("output.formats", e.to_string()));
        }
    }

    if let Err(e) = config.output.layout.parse::<graphviz::Layout>() {
        errors.push(ValidationError::new("output.layout", e.to_string()));
    }

    if config.output.graph_path.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "output.graph_path",
            "Graph path cannot be empty",
        ));
    }

    if config.cache.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("cache.path", "Cache path cannot be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate configuration and return a Result
pub fn validate_config_result(config: &GraphConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ChurrosGraphsError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}
