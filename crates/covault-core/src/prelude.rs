//! Prelude module - commonly used types for convenient import.
//!
//! Use `use covault_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{DirectoryError, DirectoryResult, LookupKind};

// Identifiers
pub use crate::{GroupId, RuleId, UserId};
