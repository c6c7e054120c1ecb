//! Covault Policy - Approval-policy rule engine for the Covault
//! governance platform.
//!
//! Every sensitive operation on the platform must satisfy a configurable
//! approval rule before it executes. Rules are small recursive policy
//! trees - quorum counts, percentage quorums, allow-lists, boolean
//! combinators, and shared named rules - referencing users and groups
//! only by opaque identifier.
//!
//! This crate covers the display side of that system:
//!
//! - **Rule model** ([`Rule`], [`ApproverSpec`]) - the policy language
//!   itself, as stored and authored.
//! - **Directory collaborator** ([`Directory`]) - read-only name lookups
//!   for users, groups, and named rules.
//! - **Resolver** ([`RuleResolver`]) - turns an identifier-only tree
//!   into a display-ready [`PopulatedRule`] tree, absorbing every lookup
//!   failure into a raw-identifier fallback.
//! - **Complexity classifier** ([`complexity`], [`is_complex`]) -
//!   decides whether a rule deserves a full breakdown or a short label.
//! - **Renderer** ([`render`]) - nested human-readable text.
//!
//! Rule *evaluation* - counting live approvals against a request -
//! happens in the request-evaluation subsystem, not here; this engine
//! only describes rules.
//!
//! # Example
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use covault_policy::{ApproverSpec, InMemoryDirectory, Rule, RuleResolver, render};
//!
//! let directory = InMemoryDirectory::new().with_user("u-1", "Alice").shared();
//! let resolver = RuleResolver::new(directory);
//!
//! let rule = Rule::quorum(1, ApproverSpec::users(["u-1"]));
//! let populated = resolver.resolve(&rule).await;
//! assert_eq!(render(&populated), "Approval from Alice");
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod complexity;
pub mod directory;
pub mod populated;
pub mod render;
pub mod resolver;
pub mod rule;

pub use complexity::{complexity, is_complex};
pub use directory::{Directory, GroupRecord, InMemoryDirectory, NamedRuleRecord, UserRecord};
pub use populated::{DisplayEntry, PopulatedApproverSpec, PopulatedRule};
pub use render::render;
pub use resolver::{RuleResolver, resolve_approvers};
pub use rule::{ApproverSpec, Rule};
