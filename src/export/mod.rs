//! Graph export
//!
//! Turns a reduced influence graph into a Graphviz description. Rendering
//! that description to images is left to the `graphviz` crate.

pub mod dot;

pub use dot::{ColorMap, DotExporter, LABEL_DELIMITER};
