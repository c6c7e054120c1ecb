//! Display-complexity scoring for populated rules.
//!
//! A single boolean combinator wrapping only leaf rules still reads fine
//! as one sentence; two or more nested combinators warrant a structured,
//! multi-line breakdown. The score counts combinator nodes and the
//! cut-off is fixed, not configurable.

use crate::populated::PopulatedRule;

/// Scores above this render as a full breakdown rather than a short
/// label.
const COMPLEX_THRESHOLD: u32 = 1;

/// Count the boolean-combinator nodes in a rule tree.
///
/// `AllOf`/`AnyOf` contribute one plus the sum of their children's
/// scores, `Not` contributes one plus its child's score, and every other
/// variant contributes zero.
#[must_use]
pub fn complexity(rule: &PopulatedRule) -> u32 {
    match rule {
        PopulatedRule::AllOf { rules } | PopulatedRule::AnyOf { rules } => {
            rules.iter().map(complexity).fold(1, u32::saturating_add)
        },
        PopulatedRule::Not { rule } => complexity(rule).saturating_add(1),
        PopulatedRule::AutoApproved
        | PopulatedRule::Quorum { .. }
        | PopulatedRule::QuorumPercentage { .. }
        | PopulatedRule::AllowListedByMetadata { .. }
        | PopulatedRule::AllowListed
        | PopulatedRule::NamedRule { .. } => 0,
    }
}

/// Whether a rule deserves a structured multi-line breakdown instead of
/// a single sentence.
#[must_use]
pub fn is_complex(rule: &PopulatedRule) -> bool {
    complexity(rule) > COMPLEX_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populated::PopulatedApproverSpec;

    fn quorum() -> PopulatedRule {
        PopulatedRule::Quorum {
            threshold: 2,
            approvers: PopulatedApproverSpec::Any,
        }
    }

    #[test]
    fn test_leaves_score_zero() {
        assert_eq!(complexity(&PopulatedRule::AutoApproved), 0);
        assert_eq!(complexity(&PopulatedRule::AllowListed), 0);
        assert_eq!(complexity(&quorum()), 0);
    }

    #[test]
    fn test_single_combinator_scores_one() {
        let rule = PopulatedRule::AllOf {
            rules: vec![quorum(), PopulatedRule::AllowListed],
        };
        assert_eq!(complexity(&rule), 1);
        assert!(!is_complex(&rule));
    }

    #[test]
    fn test_nested_combinators_accumulate() {
        let rule = PopulatedRule::AllOf {
            rules: vec![
                PopulatedRule::AnyOf {
                    rules: vec![PopulatedRule::AllowListed, PopulatedRule::AutoApproved],
                },
                PopulatedRule::Not {
                    rule: Box::new(PopulatedRule::AllowListed),
                },
                quorum(),
            ],
        };
        assert_eq!(complexity(&rule), 3);
        assert!(is_complex(&rule));
    }

    #[test]
    fn test_not_counts_as_a_combinator() {
        let rule = PopulatedRule::Not {
            rule: Box::new(PopulatedRule::AllowListed),
        };
        assert_eq!(complexity(&rule), 1);
        assert!(!is_complex(&rule));

        let doubled = PopulatedRule::Not {
            rule: Box::new(rule),
        };
        assert_eq!(complexity(&doubled), 2);
        assert!(is_complex(&doubled));
    }

    #[test]
    fn test_inlined_named_rule_does_not_add_to_score() {
        // The reference is displayed as a single named unit, however
        // complex its definition.
        let rule = PopulatedRule::NamedRule {
            id: covault_core::RuleId::new("r-1"),
            display_name: "Treasury default".to_string(),
            rule: Some(Box::new(PopulatedRule::AllOf {
                rules: vec![quorum(), PopulatedRule::AllowListed],
            })),
        };
        assert_eq!(complexity(&rule), 0);
    }

    #[test]
    fn test_is_complex_tracks_threshold() {
        let simple = PopulatedRule::AnyOf {
            rules: vec![quorum()],
        };
        let complex = PopulatedRule::AnyOf {
            rules: vec![PopulatedRule::Not {
                rule: Box::new(quorum()),
            }],
        };
        assert_eq!(is_complex(&simple), complexity(&simple) > 1);
        assert_eq!(is_complex(&complex), complexity(&complex) > 1);
        assert!(!is_complex(&simple));
        assert!(is_complex(&complex));
    }
}
