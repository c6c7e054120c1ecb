//! Resolution of identifier-only rule trees into display-ready trees.
//!
//! Resolution is total: directory failures degrade the display (raw
//! identifiers stand in for names, references stay unexpanded) and are
//! never surfaced to the caller. An operator viewing a rule whose
//! referenced user, group, or named rule no longer exists sees the raw
//! identifier in place of a friendly name, with no error banner.
//!
//! Sibling lookups - children of a combinator, identifiers inside an
//! approver list - run concurrently and are joined before the parent
//! call returns; result order always matches input order, regardless of
//! completion order.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::{BoxFuture, join_all};
use tracing::{debug, warn};

use covault_core::{GroupId, RuleId, UserId};

use crate::directory::Directory;
use crate::populated::{DisplayEntry, PopulatedApproverSpec, PopulatedRule};
use crate::rule::{ApproverSpec, Rule};

// ---------------------------------------------------------------------------
// Approver specifier resolution
// ---------------------------------------------------------------------------

/// Resolve an approver specifier's identifiers into display entries.
///
/// Each identifier is looked up independently and concurrently; a failed
/// lookup falls back to the raw identifier as the display name. Failures
/// never propagate.
pub async fn resolve_approvers(
    directory: &dyn Directory,
    spec: &ApproverSpec,
) -> PopulatedApproverSpec {
    match spec {
        ApproverSpec::Any => PopulatedApproverSpec::Any,
        ApproverSpec::Users { ids } => PopulatedApproverSpec::Users {
            users: join_all(ids.iter().map(|id| resolve_user(directory, id))).await,
        },
        ApproverSpec::Groups { ids } => PopulatedApproverSpec::Groups {
            groups: join_all(ids.iter().map(|id| resolve_group(directory, id))).await,
        },
    }
}

async fn resolve_user(directory: &dyn Directory, id: &UserId) -> DisplayEntry {
    match directory.user(id).await {
        Ok(record) => DisplayEntry::named(id.as_str(), record.name),
        Err(err) => {
            debug!(user_id = %id, error = %err, "user lookup failed, falling back to raw id");
            DisplayEntry::fallback(id.as_str())
        },
    }
}

async fn resolve_group(directory: &dyn Directory, id: &GroupId) -> DisplayEntry {
    match directory.group(id).await {
        Ok(record) => DisplayEntry::named(id.as_str(), record.name),
        Err(err) => {
            debug!(group_id = %id, error = %err, "group lookup failed, falling back to raw id");
            DisplayEntry::fallback(id.as_str())
        },
    }
}

// ---------------------------------------------------------------------------
// RuleResolver
// ---------------------------------------------------------------------------

/// Resolves raw [`Rule`] trees against a directory.
///
/// Holds only the directory handle; each [`resolve`](Self::resolve) call
/// is independent and produces a fresh [`PopulatedRule`]. Callers that
/// re-invoke resolution while a prior call is in flight should simply
/// discard the older result - populated trees share no mutable state.
pub struct RuleResolver {
    directory: Arc<dyn Directory>,
}

impl RuleResolver {
    /// Create a resolver over the given directory.
    #[must_use]
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Resolve a rule tree into its display-ready form.
    ///
    /// Never fails: every directory error is absorbed into a fallback
    /// display. Children of `AllOf`/`AnyOf` are resolved concurrently,
    /// preserving order. Named-rule references are inlined one level per
    /// reference; references inside the inlined definition are resolved
    /// recursively in turn.
    pub async fn resolve(&self, rule: &Rule) -> PopulatedRule {
        let inlining = HashSet::new();
        self.resolve_inner(rule, &inlining).await
    }

    /// Recursive walk. `inlining` holds the named-rule ids currently
    /// being inlined on this path; revisiting one breaks the cycle by
    /// leaving the reference unresolved.
    fn resolve_inner<'a>(
        &'a self,
        rule: &'a Rule,
        inlining: &'a HashSet<RuleId>,
    ) -> BoxFuture<'a, PopulatedRule> {
        Box::pin(async move {
            match rule {
                Rule::AutoApproved => PopulatedRule::AutoApproved,
                Rule::AllowListed => PopulatedRule::AllowListed,
                Rule::AllowListedByMetadata { key, value } => {
                    PopulatedRule::AllowListedByMetadata {
                        key: key.clone(),
                        value: value.clone(),
                    }
                },
                Rule::Quorum {
                    threshold,
                    approvers,
                } => PopulatedRule::Quorum {
                    threshold: *threshold,
                    approvers: resolve_approvers(self.directory.as_ref(), approvers).await,
                },
                Rule::QuorumPercentage {
                    percentage,
                    approvers,
                } => PopulatedRule::QuorumPercentage {
                    percentage: *percentage,
                    approvers: resolve_approvers(self.directory.as_ref(), approvers).await,
                },
                Rule::AllOf { rules } => PopulatedRule::AllOf {
                    rules: join_all(rules.iter().map(|r| self.resolve_inner(r, inlining))).await,
                },
                Rule::AnyOf { rules } => PopulatedRule::AnyOf {
                    rules: join_all(rules.iter().map(|r| self.resolve_inner(r, inlining))).await,
                },
                Rule::Not { rule } => PopulatedRule::Not {
                    rule: Box::new(self.resolve_inner(rule, inlining).await),
                },
                Rule::NamedRule { id } => self.resolve_named(id, inlining).await,
            }
        })
    }

    /// Resolve a named-rule reference: look up the record, then inline
    /// its definition one level.
    async fn resolve_named(&self, id: &RuleId, inlining: &HashSet<RuleId>) -> PopulatedRule {
        if inlining.contains(id) {
            warn!(rule_id = %id, "named-rule reference cycle, leaving reference unresolved");
            return PopulatedRule::NamedRule {
                id: id.clone(),
                display_name: id.to_string(),
                rule: None,
            };
        }

        match self.directory.named_rule(id).await {
            Ok(record) => {
                let display_name = record.name.unwrap_or_else(|| id.to_string());
                let rule = match record.rule {
                    Some(definition) => {
                        let mut inlining = inlining.clone();
                        inlining.insert(id.clone());
                        Some(Box::new(self.resolve_inner(&definition, &inlining).await))
                    },
                    None => None,
                };
                PopulatedRule::NamedRule {
                    id: id.clone(),
                    display_name,
                    rule,
                }
            },
            Err(err) => {
                debug!(rule_id = %id, error = %err, "named-rule lookup failed, falling back to raw id");
                PopulatedRule::NamedRule {
                    id: id.clone(),
                    display_name: id.to_string(),
                    rule: None,
                }
            },
        }
    }
}
