//! Read-only lookups against the platform directory.
//!
//! The directory service owns the mapping from opaque identifiers to
//! display names (users, user groups) and the central store of named
//! rules. The engine consumes it through the [`Directory`] trait;
//! production implementations live with the transport they wrap, and
//! [`InMemoryDirectory`] serves tests and simple deployments.
//!
//! Lookups are read-only and safe for unbounded concurrent access: the
//! resolver fans out one call per identifier with no engine-side
//! throttling, retries, or caching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use covault_core::{DirectoryError, DirectoryResult, GroupId, LookupKind, RuleId, UserId};

use crate::rule::Rule;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A user record served by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
}

/// A user-group record served by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// The group's identifier.
    pub id: GroupId,
    /// The group's display name.
    pub name: String,
}

/// A named-rule record served by the directory.
///
/// Both `name` and `rule` are optional in the directory contract. An
/// absent definition is treated identically to an unresolved reference;
/// an absent name falls back to the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRuleRecord {
    /// The rule's identifier.
    pub id: RuleId,
    /// The rule's display name, if one was set at authoring time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The stored rule definition, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl NamedRuleRecord {
    /// A record with no name or definition.
    #[must_use]
    pub fn new(id: impl Into<RuleId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            rule: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the stored definition.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }
}

// ---------------------------------------------------------------------------
// Directory trait
// ---------------------------------------------------------------------------

/// Read-only directory lookups used during rule resolution.
///
/// Implementations should be cheap to call concurrently; the resolver
/// issues sibling lookups in parallel and joins them before returning.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Look up a user by identifier.
    async fn user(&self, id: &UserId) -> DirectoryResult<UserRecord>;

    /// Look up a user group by identifier.
    async fn group(&self, id: &GroupId) -> DirectoryResult<GroupRecord>;

    /// Look up a named rule by identifier.
    async fn named_rule(&self, id: &RuleId) -> DirectoryResult<NamedRuleRecord>;
}

// ---------------------------------------------------------------------------
// InMemoryDirectory
// ---------------------------------------------------------------------------

/// In-memory directory for tests and simple deployments.
///
/// Populated up front with builder methods and read-only afterwards.
///
/// # Example
///
/// ```
/// use covault_policy::InMemoryDirectory;
///
/// let directory = InMemoryDirectory::new()
///     .with_user("u-1", "Alice")
///     .with_group("g-ops", "Operations")
///     .shared();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: HashMap<UserId, UserRecord>,
    groups: HashMap<GroupId, GroupRecord>,
    named_rules: HashMap<RuleId, NamedRuleRecord>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an [`Arc`] for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Register a user.
    #[must_use]
    pub fn with_user(mut self, id: impl Into<UserId>, name: impl Into<String>) -> Self {
        let id = id.into();
        self.users.insert(
            id.clone(),
            UserRecord {
                id,
                name: name.into(),
            },
        );
        self
    }

    /// Register a user group.
    #[must_use]
    pub fn with_group(mut self, id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        let id = id.into();
        self.groups.insert(
            id.clone(),
            GroupRecord {
                id,
                name: name.into(),
            },
        );
        self
    }

    /// Register a named rule.
    #[must_use]
    pub fn with_named_rule(mut self, record: NamedRuleRecord) -> Self {
        self.named_rules.insert(record.id.clone(), record);
        self
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn user(&self, id: &UserId) -> DirectoryResult<UserRecord> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                kind: LookupKind::User,
                id: id.to_string(),
            })
    }

    async fn group(&self, id: &GroupId) -> DirectoryResult<GroupRecord> {
        self.groups
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                kind: LookupKind::UserGroup,
                id: id.to_string(),
            })
    }

    async fn named_rule(&self, id: &RuleId) -> DirectoryResult<NamedRuleRecord> {
        self.named_rules
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                kind: LookupKind::NamedRule,
                id: id.to_string(),
            })
    }
}
