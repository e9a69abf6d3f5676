//! Groups and memberships
//!
//! Typed view of the directory: groups with their board members, and each
//! board member's own memberships across the directory. Field names follow
//! the GraphQL schema (camelCase) so payloads deserialize directly.

use super::{GroupName, PersonUid};
use crate::color::HexColor;
use serde::{Deserialize, Serialize};

/// Title given to memberships without any office
pub const PLAIN_MEMBER_TITLE: &str = "Membre";

/// A student organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique group name
    pub name: GroupName,

    /// Display color
    pub color: HexColor,

    /// Category tag (e.g. "Club", "Association")
    #[serde(rename = "type")]
    pub group_type: String,

    /// People currently holding an office in this group
    pub board_members: Vec<BoardMember>,
}

/// A board member of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    pub member: MemberProfile,
}

/// A board member's memberships across the whole directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub groups: Vec<Membership>,
}

/// A person's membership in a group, with its role flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub president: bool,
    pub secretary: bool,
    pub treasurer: bool,
    pub vice_president: bool,

    /// Free-form role title ("Membre" for plain members)
    #[serde(default)]
    pub title: Option<String>,

    /// The person holding the membership
    pub member: Person,

    /// The group the membership is in
    pub group: GroupRef,
}

impl Membership {
    /// True if any officer flag is set
    pub fn holds_officer_role(&self) -> bool {
        self.president || self.secretary || self.treasurer || self.vice_president
    }

    /// True if the membership carries a title other than the plain member one
    pub fn has_non_member_title(&self) -> bool {
        self.title
            .as_deref()
            .map(|t| !t.trim().is_empty() && t.trim() != PLAIN_MEMBER_TITLE)
            .unwrap_or(false)
    }
}

/// A person as referenced from a membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub uid: PersonUid,

    /// Seniority; lower is more junior
    pub year_tier: i32,
}

/// The group side of a membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "type")]
    pub group_type: String,
    pub name: GroupName,
}
