//! Covault Core - Foundation types for the Covault governance platform.
//!
//! This crate provides:
//! - Opaque identifier newtypes for principals referenced by approval
//!   policies ([`UserId`], [`GroupId`], [`RuleId`])
//! - The error taxonomy for directory lookups ([`DirectoryError`])
//!
//! Identifiers are issued by the platform directory service and carry no
//! structure the rest of the platform may rely on. They are compared,
//! hashed, serialized, and displayed exactly as issued.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod error;
pub mod identity;

pub use error::{DirectoryError, DirectoryResult, LookupKind};
pub use identity::{GroupId, RuleId, UserId};
