//! Influence graph
//!
//! Directed candidate arrows between groups, and the undirected graph they
//! reduce to: deduplicated edges plus, per edge, the people causing it.

use super::{GroupName, PersonUid};
use std::collections::HashMap;
use std::fmt;

/// Separator used when a pair key is rendered as a single string
pub const PAIR_KEY_SEPARATOR: char = ':';

/// A directed "board member of `source` also sits on the board of `target`" fact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateArrow {
    pub source: GroupName,
    pub person: PersonUid,
    pub target: GroupName,
}

impl CandidateArrow {
    pub fn new(
        source: impl Into<GroupName>,
        person: impl Into<PersonUid>,
        target: impl Into<GroupName>,
    ) -> Self {
        Self {
            source: source.into(),
            person: person.into(),
            target: target.into(),
        }
    }

    /// True if source and target are the same group
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Canonical key for an unordered pair of groups
///
/// The two names are stored sorted, so `(a, b)` and `(b, a)` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: GroupName,
    high: GroupName,
}

impl PairKey {
    pub fn new(a: &GroupName, b: &GroupName) -> Self {
        if a <= b {
            Self {
                low: a.clone(),
                high: b.clone(),
            }
        } else {
            Self {
                low: b.clone(),
                high: a.clone(),
            }
        }
    }

    /// The two names in sorted order
    pub fn names(&self) -> (&GroupName, &GroupName) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.low, PAIR_KEY_SEPARATOR, self.high)
    }
}

/// An undirected edge, kept in the direction it was first seen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: GroupName,
    pub b: GroupName,
}

impl Edge {
    pub fn new(a: impl Into<GroupName>, b: impl Into<GroupName>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.a, &self.b)
    }

    /// True if this edge joins the two given groups, in either direction
    pub fn connects(&self, x: &GroupName, y: &GroupName) -> bool {
        (&self.a == x && &self.b == y) || (&self.a == y && &self.b == x)
    }
}

/// Reduced graph statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub arrows: usize,
    pub self_loops: usize,
    pub distinct_people: usize,
}

/// Undirected influence graph among groups
///
/// Invariants: no self-loops, at most one edge per unordered pair, and every
/// edge has at least one cause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluenceGraph {
    /// Groups touched by at least one edge, in first-appearance order
    pub nodes: Vec<GroupName>,

    /// Edges in first-occurrence order of their arrows
    pub edges: Vec<Edge>,

    /// Distinct people causing each edge, in first-seen order
    pub causes: HashMap<PairKey, Vec<PersonUid>>,

    /// Reduction statistics
    pub stats: GraphStats,
}

impl InfluenceGraph {
    /// People causing the edge between `a` and `b` (empty when there is none)
    pub fn causes_between(&self, a: &GroupName, b: &GroupName) -> &[PersonUid] {
        self.causes
            .get(&PairKey::new(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// People causing an edge
    pub fn causes_of(&self, edge: &Edge) -> &[PersonUid] {
        self.causes_between(&edge.a, &edge.b)
    }

    pub fn contains_node(&self, name: &GroupName) -> bool {
        self.nodes.contains(name)
    }

    /// True if an edge joins `a` and `b`, in either direction
    pub fn has_edge(&self, a: &GroupName, b: &GroupName) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
