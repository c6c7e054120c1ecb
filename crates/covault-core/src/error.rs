//! Error taxonomy for directory lookups.

use std::fmt;
use thiserror::Error;

/// The kinds of record the platform directory serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// A user profile.
    User,
    /// A user group.
    UserGroup,
    /// A shared named rule.
    NamedRule,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::UserGroup => write!(f, "user group"),
            Self::NamedRule => write!(f, "named rule"),
        }
    }
}

/// Errors returned by the platform directory service.
///
/// Every variant is recoverable from the policy engine's point of view:
/// rule resolution absorbs lookup failures and degrades the display
/// (the raw identifier stands in for the name) instead of surfacing them.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No record exists for the requested identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of record requested.
        kind: LookupKind,
        /// The identifier that was requested.
        id: String,
    },

    /// The directory could not be reached, or answered with a transport
    /// error.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
