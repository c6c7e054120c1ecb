//! The approval-rule policy language.
//!
//! A [`Rule`] is a small recursive tree: quorum thresholds over a pool of
//! approvers, allow-list checks, boolean combinators, and references to
//! named rules stored centrally and shared across policies. Rules
//! reference principals by opaque identifier only; the directory service
//! owns the mapping to display names.
//!
//! Rules are immutable values. Resolution and rendering never mutate a
//! tree; they produce new ones. Well-formedness (threshold bounds,
//! percentage ranges) is an authoring-time concern enforced upstream,
//! not here.

use covault_core::{GroupId, RuleId, UserId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ApproverSpec
// ---------------------------------------------------------------------------

/// Which principals count as eligible approvers for a quorum-style rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApproverSpec {
    /// Any member of the implicit approver pool.
    Any,
    /// An explicit list of users, referenced by identifier.
    Users {
        /// The user identifiers, in authoring order.
        ids: Vec<UserId>,
    },
    /// One or more user groups, referenced by identifier.
    Groups {
        /// The group identifiers, in authoring order.
        ids: Vec<GroupId>,
    },
}

impl ApproverSpec {
    /// Approvers drawn from an explicit user list.
    #[must_use]
    pub fn users<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<UserId>,
    {
        Self::Users {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Approvers drawn from one or more user groups.
    #[must_use]
    pub fn groups<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<GroupId>,
    {
        Self::Groups {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this spec is the implicit any-approver pool.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A node in the recursive approval-policy tree.
///
/// Every sensitive operation on the platform must satisfy one of these
/// trees before it executes. This engine only *describes* rules for
/// display; counting live approvals against a request happens in the
/// request-evaluation subsystem.
///
/// # Example
///
/// ```
/// use covault_policy::{ApproverSpec, Rule};
///
/// let rule = Rule::all_of([
///     Rule::quorum(2, ApproverSpec::groups(["g-treasury"])),
///     !Rule::allow_listed_by_metadata("asset", Some("frozen".to_string())),
/// ]);
/// assert!(matches!(rule, Rule::AllOf { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// No approvals required; requests under this rule execute
    /// immediately.
    AutoApproved,
    /// Exactly `threshold` approvals required from the approver pool.
    Quorum {
        /// Number of approvals required. Non-negative by construction;
        /// no upper bound is enforced by this engine.
        threshold: u32,
        /// The eligible approver pool.
        approvers: ApproverSpec,
    },
    /// A quorum expressed as a percentage of the approver pool.
    QuorumPercentage {
        /// Required percentage of the pool, 0-100 by authoring contract.
        percentage: u8,
        /// The eligible approver pool.
        approvers: ApproverSpec,
    },
    /// Satisfied when the request target is on an allow-list keyed by a
    /// metadata pair.
    AllowListedByMetadata {
        /// The metadata key the allow-list is scoped to.
        key: String,
        /// Optional metadata value narrowing the list entry.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Satisfied when the request target is on the general allow-list.
    AllowListed,
    /// Conjunction: every child rule must be satisfied.
    AllOf {
        /// Child rules, in authoring order.
        rules: Vec<Rule>,
    },
    /// Disjunction: at least one child rule must be satisfied.
    AnyOf {
        /// Child rules, in authoring order.
        rules: Vec<Rule>,
    },
    /// Negation of a single child rule.
    Not {
        /// The negated rule.
        rule: Box<Rule>,
    },
    /// Reference to a rule stored centrally and shared across policies.
    NamedRule {
        /// Identifier of the referenced rule.
        id: RuleId,
    },
}

impl Rule {
    /// A quorum of `threshold` approvals from `approvers`.
    #[must_use]
    pub fn quorum(threshold: u32, approvers: ApproverSpec) -> Self {
        Self::Quorum {
            threshold,
            approvers,
        }
    }

    /// A quorum expressed as a percentage of the approver pool.
    #[must_use]
    pub fn quorum_percentage(percentage: u8, approvers: ApproverSpec) -> Self {
        Self::QuorumPercentage {
            percentage,
            approvers,
        }
    }

    /// Conjunction of the given rules, in order.
    #[must_use]
    pub fn all_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::AllOf {
            rules: rules.into_iter().collect(),
        }
    }

    /// Disjunction of the given rules, in order.
    #[must_use]
    pub fn any_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::AnyOf {
            rules: rules.into_iter().collect(),
        }
    }

    /// Negation of `rule`. `!rule` does the same via [`std::ops::Not`].
    #[must_use]
    pub fn negate(rule: Rule) -> Self {
        Self::Not {
            rule: Box::new(rule),
        }
    }

    /// Reference to the named rule with the given identifier.
    #[must_use]
    pub fn named(id: impl Into<RuleId>) -> Self {
        Self::NamedRule { id: id.into() }
    }

    /// Allow-list check keyed by a metadata pair.
    #[must_use]
    pub fn allow_listed_by_metadata(key: impl Into<String>, value: Option<String>) -> Self {
        Self::AllowListedByMetadata {
            key: key.into(),
            value,
        }
    }
}

impl std::ops::Not for Rule {
    type Output = Rule;

    fn not(self) -> Rule {
        Rule::negate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    #[test]
    fn test_constructors_preserve_order() {
        let rule = Rule::all_of([
            Rule::AllowListed,
            Rule::quorum(1, ApproverSpec::users(["u-1", "u-2"])),
        ]);

        let Rule::AllOf { rules } = rule else {
            panic!("expected AllOf");
        };
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], Rule::AllowListed);
        assert!(matches!(rules[1], Rule::Quorum { threshold: 1, .. }));
    }

    #[test]
    fn test_not_operator_boxes_child() {
        let rule = !Rule::AllowListed;
        assert_eq!(
            rule,
            Rule::Not {
                rule: Box::new(Rule::AllowListed)
            }
        );
    }

    #[test]
    fn test_approver_spec_is_any() {
        assert!(ApproverSpec::Any.is_any());
        assert!(!ApproverSpec::users(["u-1"]).is_any());
        assert!(!ApproverSpec::groups(["g-1"]).is_any());
    }

    // -----------------------------------------------------------------------
    // Wire form
    // -----------------------------------------------------------------------

    #[test]
    fn test_wire_form_is_kind_tagged() {
        let rule = Rule::quorum(2, ApproverSpec::users(["u-1"]));
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "quorum",
                "threshold": 2,
                "approvers": { "kind": "users", "ids": ["u-1"] },
            })
        );
    }

    #[test]
    fn test_metadata_value_omitted_when_absent() {
        let rule = Rule::allow_listed_by_metadata("asset", None);
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({ "kind": "allow_listed_by_metadata", "key": "asset" })
        );
    }

    #[test]
    fn test_nested_rule_round_trips() {
        let rule = Rule::any_of([
            Rule::AutoApproved,
            Rule::all_of([
                Rule::quorum_percentage(50, ApproverSpec::Any),
                !Rule::named("treasury-default"),
            ]),
        ]);

        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
