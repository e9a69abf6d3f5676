//! Typed response payloads
//!
//! Raw JSON responses are converted here, once, into the typed directory
//! model. Any mismatch with the expected shape is a `Shape` error.

use crate::color::HexColor;
use crate::graph::{Group, GroupName};
use crate::{ChurrosGraphsError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// `data` member of the memberships query response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MembershipsData {
    pub groups: Vec<Group>,
}

impl MembershipsData {
    /// Validate a full response (`{"data": {"groups": [...]}}`)
    pub fn from_response(response: &Value) -> Result<Self> {
        let data = response
            .get("data")
            .ok_or_else(|| ChurrosGraphsError::Shape("missing `data`".to_string()))?;

        if data.get("groups").is_none() {
            return Err(ChurrosGraphsError::Shape("missing `data.groups`".to_string()));
        }

        Self::deserialize(data)
            .map_err(|e| ChurrosGraphsError::Shape(format!("in `data.groups`: {}", e)))
    }

    /// Display color of every group in the response, by name
    pub fn colors(&self) -> HashMap<GroupName, HexColor> {
        self.groups
            .iter()
            .map(|group| (group.name.clone(), group.color))
            .collect()
    }
}
