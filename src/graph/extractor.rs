//! Membership extraction
//!
//! Walks groups → board members → their memberships and yields one candidate
//! arrow per membership that passes the eligibility filter.

use super::{CandidateArrow, Group, Membership};
use crate::config::{BoardPolicyKind, FilterConfig};
use std::collections::HashSet;
use std::fmt::Debug;

/// Decides whether a membership counts as holding a board office
pub trait BoardPolicy: Debug + Send + Sync {
    fn qualifies(&self, membership: &Membership) -> bool;
}

/// Any of president, secretary, treasurer or vice-president
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficerRoles;

impl BoardPolicy for OfficerRoles {
    fn qualifies(&self, membership: &Membership) -> bool {
        membership.holds_officer_role()
    }
}

/// Any titled membership that is not a plain "Membre"
#[derive(Debug, Clone, Copy, Default)]
pub struct NotPlainMember;

impl BoardPolicy for NotPlainMember {
    fn qualifies(&self, membership: &Membership) -> bool {
        membership.has_non_member_title()
    }
}

impl BoardPolicyKind {
    /// Policy implementing this kind
    pub fn policy(&self) -> Box<dyn BoardPolicy> {
        match self {
            BoardPolicyKind::OfficerRoles => Box::new(OfficerRoles),
            BoardPolicyKind::NotPlainMember => Box::new(NotPlainMember),
        }
    }
}

/// Turns a list of groups into candidate arrows
#[derive(Debug)]
pub struct MembershipExtractor {
    allowed_group_types: HashSet<String>,
    max_year_tier: i32,
    policy: Box<dyn BoardPolicy>,
}

impl MembershipExtractor {
    /// Create an extractor using the officer-roles policy
    pub fn new<I, S>(allowed_group_types: I, max_year_tier: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_group_types: allowed_group_types.into_iter().map(Into::into).collect(),
            max_year_tier,
            policy: Box::new(OfficerRoles),
        }
    }

    /// Create an extractor from the filter section of the configuration
    pub fn from_config(filter: &FilterConfig) -> Self {
        Self::new(filter.group_types.iter().cloned(), filter.max_year_tier)
            .with_policy(filter.board_policy.policy())
    }

    /// Replace the board office policy
    pub fn with_policy(mut self, policy: Box<dyn BoardPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// True if `membership` can cause an arrow towards its group
    pub fn is_eligible(&self, membership: &Membership) -> bool {
        self.allowed_group_types
            .contains(&membership.group.group_type)
            && self.policy.qualifies(membership)
            && membership.member.year_tier <= self.max_year_tier
    }

    /// Lazily extract arrows in payload order
    ///
    /// Yields `(group, member, other group)` for each board member's eligible
    /// membership. Self-arrows (a board member's membership in the same
    /// group) are yielded too; the reducer drops them.
    pub fn extract<'a>(&'a self, groups: &'a [Group]) -> impl Iterator<Item = CandidateArrow> + 'a {
        groups.iter().flat_map(move |group| {
            group
                .board_members
                .iter()
                .flat_map(|board_member| board_member.member.groups.iter())
                .filter(move |membership| self.is_eligible(membership))
                .map(move |membership| CandidateArrow {
                    source: group.name.clone(),
                    person: membership.member.uid.clone(),
                    target: membership.group.name.clone(),
                })
                .inspect(|arrow| {
                    tracing::trace!(
                        source = %arrow.source,
                        person = %arrow.person,
                        target = %arrow.target,
                        "Candidate arrow"
                    )
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::graph::{BoardMember, GroupName, GroupRef, MemberProfile, Person, PersonUid};

    fn office(uid: &str, tier: i32, group: &str, group_type: &str) -> Membership {
        Membership {
            president: true,
            secretary: false,
            treasurer: false,
            vice_president: false,
            title: Some("Président".to_string()),
            member: Person {
                uid: PersonUid::new(uid),
                year_tier: tier,
            },
            group: GroupRef {
                group_type: group_type.to_string(),
                name: GroupName::new(group),
            },
        }
    }

    fn plain(uid: &str, group: &str) -> Membership {
        Membership {
            president: false,
            title: Some("Membre".to_string()),
            ..office(uid, 1, group, "Club")
        }
    }

    fn group(name: &str, boards: Vec<Vec<Membership>>) -> Group {
        Group {
            name: GroupName::new(name),
            color: HexColor::new(0, 0, 0),
            group_type: "Club".to_string(),
            board_members: boards
                .into_iter()
                .map(|groups| BoardMember {
                    member: MemberProfile { groups },
                })
                .collect(),
        }
    }

    fn extractor() -> MembershipExtractor {
        MembershipExtractor::new(["Club", "Association"], 3)
    }

    #[test]
    fn test_extract_follows_payload_order() {
        let groups = vec![
            group("A", vec![vec![office("u1", 1, "A", "Club"), office("u1", 1, "B", "Club")]]),
            group("B", vec![vec![office("u2", 2, "C", "Association")]]),
        ];

        let arrows: Vec<_> = extractor().extract(&groups).collect();
        assert_eq!(
            arrows,
            vec![
                CandidateArrow::new("A", "u1", "A"),
                CandidateArrow::new("A", "u1", "B"),
                CandidateArrow::new("B", "u2", "C"),
            ]
        );
    }

    #[test]
    fn test_plain_membership_does_not_qualify() {
        let groups = vec![group("A", vec![vec![plain("u1", "B")]])];
        assert_eq!(extractor().extract(&groups).count(), 0);
    }

    #[test]
    fn test_group_type_filter() {
        let groups = vec![group(
            "A",
            vec![vec![office("u1", 1, "Sport", "Team"), office("u1", 1, "B", "Club")]],
        )];
        let arrows: Vec<_> = extractor().extract(&groups).collect();
        assert_eq!(arrows, vec![CandidateArrow::new("A", "u1", "B")]);
    }

    #[test]
    fn test_year_tier_threshold_is_inclusive() {
        let groups = vec![group(
            "A",
            vec![
                vec![office("junior", 3, "B", "Club")],
                vec![office("senior", 4, "C", "Club")],
            ],
        )];
        let arrows: Vec<_> = extractor().extract(&groups).collect();
        assert_eq!(arrows, vec![CandidateArrow::new("A", "junior", "B")]);
    }

    #[test]
    fn test_each_office_flag_qualifies() {
        let base = plain("u1", "B");
        let flags: [fn(&mut Membership); 4] = [
            |m| m.president = true,
            |m| m.secretary = true,
            |m| m.treasurer = true,
            |m| m.vice_president = true,
        ];
        for set in flags {
            let mut m = base.clone();
            set(&mut m);
            assert!(extractor().is_eligible(&m));
        }
        assert!(!extractor().is_eligible(&base));
    }

    #[test]
    fn test_not_plain_member_policy() {
        let mut titled = plain("u2", "C");
        titled.title = Some("Respo com".to_string());

        let groups = vec![group("A", vec![vec![plain("u1", "B"), titled]])];
        let extractor = extractor().with_policy(BoardPolicyKind::NotPlainMember.policy());

        let arrows: Vec<_> = extractor.extract(&groups).collect();
        assert_eq!(arrows, vec![CandidateArrow::new("A", "u2", "C")]);
    }

    #[test]
    fn test_from_config() {
        let filter = FilterConfig {
            group_types: vec!["Club".to_string()],
            max_year_tier: 1,
            board_policy: BoardPolicyKind::OfficerRoles,
        };
        let extractor = MembershipExtractor::from_config(&filter);
        assert!(extractor.is_eligible(&office("u1", 1, "B", "Club")));
        assert!(!extractor.is_eligible(&office("u1", 2, "B", "Club")));
        assert!(!extractor.is_eligible(&office("u1", 1, "B", "Association")));
    }
}
