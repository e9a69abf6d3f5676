//! Configuration sections
//!
//! Each section maps to a top-level key of the config file (api, filter,
//! output, cache).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Token prefixed to every operation name (e.g. `ChurrosGraphs_Memberships`)
    #[serde(default = "default_operation_namespace")]
    pub operation_namespace: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://churros.inpt.fr/graphql".to_string()
}

fn default_operation_namespace() -> String {
    "ChurrosGraphs".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            operation_namespace: default_operation_namespace(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which memberships count as holding a board office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPolicyKind {
    /// Any of president, secretary, treasurer or vice-president
    #[default]
    OfficerRoles,

    /// Any titled membership other than a plain "Membre"
    NotPlainMember,
}

/// Eligibility filter applied while extracting arrows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Group types that may appear as arrow targets (and are queried)
    #[serde(default = "default_group_types")]
    pub group_types: Vec<String>,

    /// Highest year-tier still considered (inclusive)
    #[serde(default = "default_max_year_tier")]
    pub max_year_tier: i32,

    /// Board office test
    #[serde(default)]
    pub board_policy: BoardPolicyKind,
}

fn default_group_types() -> Vec<String> {
    vec![
        "Association".to_string(),
        "Club".to_string(),
        "StudentAssociationSection".to_string(),
    ]
}

fn default_max_year_tier() -> i32 {
    3
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            group_types: default_group_types(),
            max_year_tier: default_max_year_tier(),
            board_policy: BoardPolicyKind::default(),
        }
    }
}

/// Graph description and rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Label each edge with the people causing it
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,

    /// Where the Graphviz description is written
    #[serde(default = "default_graph_path")]
    pub graph_path: PathBuf,

    /// Image formats rendered next to the description
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Graphviz layout engine
    #[serde(default = "default_layout")]
    pub layout: String,
}

fn default_show_labels() -> bool {
    true
}

fn default_graph_path() -> PathBuf {
    PathBuf::from("graph.dot")
}

fn default_formats() -> Vec<String> {
    vec!["png".to_string(), "svg".to_string()]
}

fn default_layout() -> String {
    "neato".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_labels: default_show_labels(),
            graph_path: default_graph_path(),
            formats: default_formats(),
            layout: default_layout(),
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Path of the flat JSON response cache
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("querycache.json")
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}
