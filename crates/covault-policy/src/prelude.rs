//! Prelude module - commonly used types for convenient import.
//!
//! Use `use covault_policy::prelude::*;` to import the whole engine
//! surface plus the core identifier types.

// Rule model
pub use crate::{ApproverSpec, Rule};

// Populated model
pub use crate::{DisplayEntry, PopulatedApproverSpec, PopulatedRule};

// Directory
pub use crate::{Directory, GroupRecord, InMemoryDirectory, NamedRuleRecord, UserRecord};

// Resolution, classification, rendering
pub use crate::{RuleResolver, complexity, is_complex, render, resolve_approvers};

// Core identifiers
pub use covault_core::{DirectoryError, DirectoryResult, GroupId, RuleId, UserId};
