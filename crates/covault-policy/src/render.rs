//! Human-readable rendering of populated rules.
//!
//! A pure recursive transform: one text template per variant, with
//! nested combinators rendered as bulleted blocks indented one
//! fixed-width unit per level. Indentation is applied by prefixing every
//! line of a child's rendered text, so depth survives arbitrary nesting.
//!
//! Named-rule references render as their display name only; the inlined
//! definition stays available on the [`PopulatedRule`] for callers that
//! want to expand it, but a named rule is a reusable unit and expanding
//! it is the caller's decision, not this module's.

use std::fmt;

use crate::populated::{DisplayEntry, PopulatedApproverSpec, PopulatedRule};

/// One level of nesting, prepended to every line of a child block.
const INDENT: &str = "  ";
/// Marks the first line of each child block.
const BULLET: &str = "- ";

/// Render a populated rule as nested human-readable text.
#[must_use]
pub fn render(rule: &PopulatedRule) -> String {
    match rule {
        PopulatedRule::AutoApproved => "Automatically approved".to_string(),
        PopulatedRule::AllowListed => "Target is on the allow-list".to_string(),
        PopulatedRule::AllowListedByMetadata { key, value } => match value {
            Some(value) => format!("Target is on the allow-list for {key}={value}"),
            None => format!("Target is on the allow-list for {key}"),
        },
        PopulatedRule::Quorum {
            threshold,
            approvers,
        } => render_quorum(*threshold, approvers),
        PopulatedRule::QuorumPercentage {
            percentage,
            approvers,
        } => render_percentage(*percentage, approvers),
        PopulatedRule::AllOf { rules } => render_combinator("All of:", rules),
        PopulatedRule::AnyOf { rules } => render_combinator("Any of:", rules),
        PopulatedRule::Not { rule } => {
            let mut out = String::from("Not:");
            out.push('\n');
            out.push_str(&child_block(rule));
            out
        },
        PopulatedRule::NamedRule { display_name, .. } => display_name.clone(),
    }
}

impl fmt::Display for PopulatedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

fn render_quorum(threshold: u32, approvers: &PopulatedApproverSpec) -> String {
    match approvers {
        PopulatedApproverSpec::Any => {
            format!("Any {threshold} approver{}", plural(threshold))
        },
        PopulatedApproverSpec::Users { users } => {
            // A zero threshold or an empty approver list can never block
            // approval, so the rule is shown as what it effectively is.
            if threshold == 0 || users.is_empty() {
                "No approvals required".to_string()
            } else if let [only] = users.as_slice() {
                format!("Approval from {}", only.display_name)
            } else {
                format!(
                    "{threshold} approval{} from: {}",
                    plural(threshold),
                    names(users)
                )
            }
        },
        PopulatedApproverSpec::Groups { groups } => {
            format!(
                "{threshold} approval{} from members of: {}",
                plural(threshold),
                names(groups)
            )
        },
    }
}

fn render_percentage(percentage: u8, approvers: &PopulatedApproverSpec) -> String {
    match approvers {
        PopulatedApproverSpec::Any => format!("{percentage}% of approvers"),
        PopulatedApproverSpec::Users { users } => {
            format!("{percentage}% of {}", names(users))
        },
        PopulatedApproverSpec::Groups { groups } => {
            format!("{percentage}% of {}", names(groups))
        },
    }
}

fn render_combinator(header: &str, children: &[PopulatedRule]) -> String {
    let mut out = String::from(header);
    for child in children {
        out.push('\n');
        out.push_str(&child_block(child));
    }
    out
}

/// Render a child and shift its block one level: every line gains an
/// indent unit, the first also gains the bullet marker.
fn child_block(child: &PopulatedRule) -> String {
    let rendered = render(child);
    let mut out = String::new();
    for (index, line) in rendered.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(INDENT);
        if index == 0 {
            out.push_str(BULLET);
        }
        out.push_str(line);
    }
    out
}

fn names(entries: &[DisplayEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}
