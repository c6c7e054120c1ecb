//! Display-ready mirrors of the rule model.
//!
//! Resolution replaces every identifier in a [`Rule`](crate::Rule) tree
//! with an `(id, display name)` pair looked up from the directory,
//! producing a [`PopulatedRule`]. Populated trees are per-call display
//! values: built for one render cycle, then thrown away. The engine never
//! caches or persists them; callers may, if their lookups are expensive.

use covault_core::RuleId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DisplayEntry
// ---------------------------------------------------------------------------

/// A resolved identifier with its display name.
///
/// When a lookup fails, the display name falls back to the raw
/// identifier, so an operator still sees something addressable instead of
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// The raw identifier, as referenced by the rule.
    pub id: String,
    /// The resolved display name, or the raw identifier on lookup
    /// failure.
    pub display_name: String,
}

impl DisplayEntry {
    /// An entry whose name resolved.
    #[must_use]
    pub fn named(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// An entry whose lookup failed; the identifier doubles as the name.
    #[must_use]
    pub fn fallback(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
        }
    }
}

// ---------------------------------------------------------------------------
// PopulatedApproverSpec
// ---------------------------------------------------------------------------

/// An approver pool with identifiers resolved to display entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopulatedApproverSpec {
    /// Any member of the implicit approver pool.
    Any,
    /// Explicit users with resolved names, in authoring order.
    Users {
        /// The resolved user entries.
        users: Vec<DisplayEntry>,
    },
    /// User groups with resolved names, in authoring order.
    Groups {
        /// The resolved group entries.
        groups: Vec<DisplayEntry>,
    },
}

// ---------------------------------------------------------------------------
// PopulatedRule
// ---------------------------------------------------------------------------

/// A rule tree with every identifier resolved for display.
///
/// Mirrors [`Rule`](crate::Rule) variant for variant, with approver
/// specifiers populated and named-rule references carrying their resolved
/// name plus a one-level inlining of the referenced definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopulatedRule {
    /// No approvals required.
    AutoApproved,
    /// Exactly `threshold` approvals required from the approver pool.
    Quorum {
        /// Number of approvals required.
        threshold: u32,
        /// The resolved approver pool.
        approvers: PopulatedApproverSpec,
    },
    /// A quorum expressed as a percentage of the approver pool.
    QuorumPercentage {
        /// Required percentage of the pool.
        percentage: u8,
        /// The resolved approver pool.
        approvers: PopulatedApproverSpec,
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
        /// Resolved child rules, in authoring order.
        rules: Vec<PopulatedRule>,
    },
    /// Disjunction: at least one child rule must be satisfied.
    AnyOf {
        /// Resolved child rules, in authoring order.
        rules: Vec<PopulatedRule>,
    },
    /// Negation of a single child rule.
    Not {
        /// The negated rule.
        rule: Box<PopulatedRule>,
    },
    /// A named-rule reference with its definition inlined one level.
    NamedRule {
        /// Identifier of the referenced rule.
        id: RuleId,
        /// The named rule's own name, or the raw identifier when the
        /// reference could not be resolved or the record carried no name.
        display_name: String,
        /// One-level inlining of the referenced definition; `None` when
        /// the reference could not be resolved. Nested references inside
        /// the inlined tree are resolved recursively in turn.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule: Option<Box<PopulatedRule>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_entry_reuses_id_as_name() {
        let entry = DisplayEntry::fallback("u-9");
        assert_eq!(entry.id, "u-9");
        assert_eq!(entry.display_name, "u-9");
    }

    #[test]
    fn test_named_entry_keeps_both_fields() {
        let entry = DisplayEntry::named("u-1", "Alice");
        assert_eq!(entry.id, "u-1");
        assert_eq!(entry.display_name, "Alice");
    }

    #[test]
    fn test_unresolved_named_rule_omits_definition_on_wire() {
        let populated = PopulatedRule::NamedRule {
            id: RuleId::new("r-1"),
            display_name: "r-1".to_string(),
            rule: None,
        };
        let value = serde_json::to_value(&populated).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "named_rule",
                "id": "r-1",
                "display_name": "r-1",
            })
        );
    }
}
