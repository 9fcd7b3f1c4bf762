//! Constraint evaluation for a single candidate assignment.
//!
//! Constraints run strictly in declared order and evaluation stops at the
//! first one that invalidates the assignment. Null actions rewrite the
//! assignment as they go, so later constraints see the nulled value. The
//! assignment is passed in by value and handed back inside the
//! [`Evaluation`], carrying every mutation with it.

use crate::core::assignment::{Assignment, Value};
use crate::core::constraint::{Action, Condition, Constraint, ConstraintSet};
use crate::util::Symbol;

/// Outcome of evaluating one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    /// Rejected by the constraint at `position` (0-based, declaration order).
    Blocked { position: usize, blocker: Symbol },
}

/// The evaluated assignment together with its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The assignment after every applied null action.
    pub assignment: Assignment,
    pub verdict: Verdict,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        matches!(self.verdict, Verdict::Valid)
    }

    /// Identity of the blocking constraint. `None` for valid assignments.
    pub fn blocker(&self) -> Option<Symbol> {
        match self.verdict {
            Verdict::Valid => None,
            Verdict::Blocked { blocker, .. } => Some(blocker),
        }
    }
}

/// What happened at one constraint while evaluating an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<'a> {
    /// Domain rule held.
    DomainSatisfied { value: Value },
    /// Domain rule rejected the value.
    DomainViolated { value: Value },
    /// Conditional rule did not apply because this condition failed.
    ConditionFailed {
        condition: &'a Condition,
        actual: Value,
    },
    /// Block action found the value allowed.
    BlockSatisfied { action: &'a Action, value: Value },
    /// Block action rejected the value.
    BlockViolated { action: &'a Action, value: Value },
    /// Null action cleared a feature.
    Nulled { action: &'a Action, previous: Value },
}

/// One trace entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<'a> {
    pub position: usize,
    pub constraint: &'a Constraint,
    pub outcome: StepOutcome<'a>,
}

/// Evaluate `assignment` against `constraints`.
pub fn evaluate(assignment: Assignment, constraints: &ConstraintSet) -> Evaluation {
    evaluate_traced(assignment, constraints, |_| {})
}

/// Evaluate `assignment`, reporting every step to `observe`.
pub fn evaluate_traced<'c, F>(
    mut assignment: Assignment,
    constraints: &'c ConstraintSet,
    mut observe: F,
) -> Evaluation
where
    F: FnMut(Step<'c>),
{
    for (position, constraint) in constraints.iter().enumerate() {
        let mut step = |outcome| {
            observe(Step {
                position,
                constraint,
                outcome,
            })
        };

        let blocked = match constraint {
            Constraint::Domain(rule) => {
                let value = assignment.get(rule.feature.index());
                if value.is_one_of(&rule.allowed_values) {
                    step(StepOutcome::DomainSatisfied { value });
                    false
                } else {
                    step(StepOutcome::DomainViolated { value });
                    true
                }
            }

            Constraint::Conditional(rule) => {
                let failed = rule.conditions.iter().find_map(|condition| {
                    let actual = assignment.get(condition.feature.index());
                    (!actual.matches(condition.value)).then_some((condition, actual))
                });

                if let Some((condition, actual)) = failed {
                    step(StepOutcome::ConditionFailed { condition, actual });
                    continue;
                }

                let mut blocked = false;
                for action in &rule.actions {
                    match action {
                        Action::Block {
                            feature,
                            allowed_values,
                        } => {
                            let value = assignment.get(feature.index());
                            if value.is_one_of(allowed_values) {
                                step(StepOutcome::BlockSatisfied { action, value });
                            } else {
                                step(StepOutcome::BlockViolated { action, value });
                                blocked = true;
                                break;
                            }
                        }
                        Action::Null { feature } => {
                            let previous = assignment.get(feature.index());
                            assignment = assignment.with_null(feature.index());
                            step(StepOutcome::Nulled { action, previous });
                        }
                    }
                }
                blocked
            }
        };

        if blocked {
            let blocker = constraint.blocker_id();
            tracing::trace!("{} blocked by {}", assignment, blocker);
            return Evaluation {
                assignment,
                verdict: Verdict::Blocked { position, blocker },
            };
        }
    }

    Evaluation {
        assignment,
        verdict: Verdict::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::declaration::Declaration;
    use crate::core::feature::FeatureCatalog;
    use crate::test_support::fixtures;

    fn model(text: &str) -> (FeatureCatalog, ConstraintSet) {
        Declaration::from_json("test", text)
            .unwrap()
            .to_model()
            .unwrap()
    }

    fn assignment(codes: &[&str]) -> Assignment {
        Assignment::from_codes(codes.iter().map(Symbol::new))
    }

    #[test]
    fn test_empty_constraint_set_is_valid_without_blocker() {
        let (_, constraints) = model(fixtures::TWO_BY_TWO);
        let eval = evaluate(assignment(&["x", "q"]), &constraints);

        assert!(eval.is_valid());
        assert_eq!(eval.blocker(), None);
        assert_eq!(eval.assignment.render(), "x/q");
    }

    #[test]
    fn test_domain_violation_uses_feature_name() {
        let (_, constraints) = model(fixtures::DOMAIN_RESTRICTION);

        let eval = evaluate(assignment(&["y", "q"]), &constraints);
        assert_eq!(
            eval.verdict,
            Verdict::Blocked {
                position: 0,
                blocker: Symbol::new("B")
            }
        );

        assert!(evaluate(assignment(&["y", "p"]), &constraints).is_valid());
    }

    #[test]
    fn test_valid_assignment_never_reports_last_constraint() {
        let (_, constraints) = model(fixtures::BLOCK_AND_NULL_CHAIN);
        // Passes every rule, including the last one in the set.
        let eval = evaluate(assignment(&["y", "p", "u"]), &constraints);
        assert!(eval.is_valid());
        assert_eq!(eval.blocker(), None);
    }

    #[test]
    fn test_null_action_mutates_assignment() {
        let (_, constraints) = model(fixtures::NULL_ACTION);

        let eval = evaluate(assignment(&["x", "q"]), &constraints);
        assert!(eval.is_valid());
        assert_eq!(eval.assignment.render(), "x/None");

        let untouched = evaluate(assignment(&["y", "q"]), &constraints);
        assert_eq!(untouched.assignment.render(), "y/q");
    }

    #[test]
    fn test_block_action_blocks_when_condition_holds() {
        let (_, constraints) = model(fixtures::BLOCK_ALL);

        let eval = evaluate(assignment(&["x", "p"]), &constraints);
        assert_eq!(eval.blocker(), Some(Symbol::new("C1")));

        assert!(evaluate(assignment(&["y", "p"]), &constraints).is_valid());
    }

    #[test]
    fn test_null_is_visible_to_later_constraints() {
        let (_, constraints) = model(fixtures::BLOCK_AND_NULL_CHAIN);

        // N1 nulls C when A = x, and D1 accepts the nulled value.
        let eval = evaluate(assignment(&["x", "p", "v"]), &constraints);
        assert!(eval.is_valid(), "{:?}", eval.verdict);
        assert_eq!(eval.assignment.render(), "x/p/None");

        // Without the null, B1 sees the original code of C and blocks.
        let blocked = evaluate(assignment(&["y", "q", "v"]), &constraints);
        assert_eq!(blocked.blocker(), Some(Symbol::new("B1")));
    }

    #[test]
    fn test_first_violation_wins() {
        let (_, constraints) = model(fixtures::OVERLAPPING_BLOCKERS);
        let eval = evaluate(assignment(&["x", "q"]), &constraints);
        assert_eq!(
            eval.verdict,
            Verdict::Blocked {
                position: 0,
                blocker: Symbol::new("first")
            }
        );
    }

    #[test]
    fn test_actions_after_block_are_skipped() {
        let text = r#"{
            "features": [
                { "name": "A", "domain": ["x"] },
                { "name": "B", "domain": ["p"] }
            ],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [{ "feature": "A", "value": "x" }],
                "actions": [
                    { "feature": "A", "mode": "block", "allowed_values": [] },
                    { "feature": "B", "mode": "null" }
                ]
            }]
        }"#;
        let (_, constraints) = model(text);
        let eval = evaluate(assignment(&["x", "p"]), &constraints);

        assert!(!eval.is_valid());
        assert_eq!(eval.assignment.render(), "x/p");
    }

    #[test]
    fn test_null_applied_before_block_is_kept() {
        let text = r#"{
            "features": [
                { "name": "A", "domain": ["x"] },
                { "name": "B", "domain": ["p"] }
            ],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [{ "feature": "A", "value": "x" }],
                "actions": [
                    { "feature": "B", "mode": "null" },
                    { "feature": "A", "mode": "block", "allowed_values": ["y"] }
                ]
            }]
        }"#;
        let (_, constraints) = model(text);
        let eval = evaluate(assignment(&["x", "p"]), &constraints);

        assert_eq!(eval.blocker(), Some(Symbol::new("C1")));
        assert_eq!(eval.assignment.render(), "x/None");
    }

    #[test]
    fn test_condition_matches_nulled_feature_by_token() {
        let text = r#"{
            "features": [
                { "name": "A", "domain": ["x"] },
                { "name": "B", "domain": ["p"] }
            ],
            "constraints": [
                {
                    "rule_type": "conditional", "id": "N",
                    "conditions": [],
                    "actions": [{ "feature": "B", "mode": "null" }]
                },
                {
                    "rule_type": "conditional", "id": "AfterNull",
                    "conditions": [{ "feature": "B", "value": "None" }],
                    "actions": [{ "feature": "A", "mode": "block", "allowed_values": [] }]
                }
            ]
        }"#;
        let (_, constraints) = model(text);
        let eval = evaluate(assignment(&["x", "p"]), &constraints);
        assert_eq!(eval.blocker(), Some(Symbol::new("AfterNull")));
    }

    #[test]
    fn test_trace_reports_each_step() {
        let (_, constraints) = model(fixtures::BLOCK_AND_NULL_CHAIN);
        let mut steps = Vec::new();
        let eval = evaluate_traced(assignment(&["x", "p", "v"]), &constraints, |step| {
            steps.push((step.position, step.outcome.clone()))
        });

        assert!(eval.is_valid());
        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[0].1, StepOutcome::Nulled { previous, .. } if previous.as_str() == "v"));
        assert!(matches!(steps[1].1, StepOutcome::ConditionFailed { .. }));
        assert!(matches!(steps[2].1, StepOutcome::DomainSatisfied { value } if value.is_null()));
    }
}
