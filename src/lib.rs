//! churros-graphs - influence graph of student organizations
//!
//! Queries the Churros directory for the board members of every association,
//! club and section, links two groups whenever someone sits on a board in one
//! and holds an office in the other, and writes the result as a Graphviz
//! description ready to be rendered.
//!
//! # Architecture
//!
//! - **api**: Named GraphQL queries, transport, typed payloads
//! - **cache**: Flat JSON response cache keyed by query fingerprint
//! - **graph**: Directory model, arrow extraction and reduction
//! - **export**: DOT description of the reduced graph
//! - **pipeline**: query → extract → reduce → export → render
//! - **config**: YAML configuration and validation

// Core modules
pub mod api;
pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod pipeline;

// Ambient
pub mod logging;
pub mod style;

// Re-exports
pub use error::{ChurrosGraphsError, Result};
