//! Core graph data structures
//!
//! Defines the directory model (Group, Membership), candidate arrows, and the
//! reduced InfluenceGraph, plus the extraction and reduction steps between them.

mod extractor;
mod group;
mod ids;
mod influence_graph;
mod reducer;

pub use extractor::{BoardPolicy, MembershipExtractor, NotPlainMember, OfficerRoles};
pub use group::{BoardMember, Group, GroupRef, MemberProfile, Membership, Person, PLAIN_MEMBER_TITLE};
pub use ids::{GroupName, PersonUid};
pub use influence_graph::{
    CandidateArrow, Edge, GraphStats, InfluenceGraph, PairKey, PAIR_KEY_SEPARATOR,
};
pub use reducer::{reduce, GraphReducer};
