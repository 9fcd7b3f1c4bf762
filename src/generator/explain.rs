//! Single-assignment explanations.
//!
//! Takes one code per feature, evaluates that assignment with tracing turned
//! on and renders what each constraint did to it.

use serde::Serialize;
use thiserror::Error;

use crate::core::assignment::Assignment;
use crate::core::constraint::ConstraintSet;
use crate::core::feature::FeatureCatalog;
use crate::generator::evaluate::{evaluate_traced, Step, StepOutcome};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Input that does not name an assignment of the catalog.
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("expected {expected} values, one per feature, got {found}")]
    WrongArity {
        expected: usize,
        found: usize,
        features: Vec<String>,
    },

    #[error("`{code}` is not in the domain of `{feature}`")]
    UnknownCode {
        feature: String,
        code: String,
        domain: Vec<String>,
    },
}

impl ExplainError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExplainError::WrongArity {
                expected,
                found,
                features,
            } => Diagnostic::error(self.to_string())
                .with_context(format!("features, in order: {}", features.join(", ")))
                .with_suggestion(format!(
                    "Pass exactly {} codes instead of {}",
                    expected, found
                )),

            ExplainError::UnknownCode {
                feature, domain, ..
            } => Diagnostic::error(self.to_string())
                .with_context(format!("domain of `{}`: {}", feature, domain.join(", ")))
                .with_suggestion(suggestions::RUN_CHECK),
        }
    }
}

/// The trace of one evaluated assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// The assignment as given.
    pub input: String,
    /// The assignment after null actions.
    pub result: String,
    pub valid: bool,
    pub blocker: Option<String>,
    /// One line per constraint that was evaluated.
    pub steps: Vec<String>,
}

impl Explanation {
    /// Render the trace followed by the verdict.
    pub fn render_text(&self) -> String {
        let mut out = format!("Configuration: {}\n", self.input);
        for step in &self.steps {
            out.push_str("  ");
            out.push_str(step);
            out.push('\n');
        }
        match &self.blocker {
            Some(blocker) => out.push_str(&format!("Blocked by ({}): {}\n", blocker, self.result)),
            None => out.push_str(&format!("Valid: {}\n", self.result)),
        }
        out
    }
}

/// Evaluate the assignment named by `codes` and record every step.
pub fn explain<S: AsRef<str>>(
    catalog: &FeatureCatalog,
    constraints: &ConstraintSet,
    codes: &[S],
) -> Result<Explanation, ExplainError> {
    if codes.len() != catalog.len() {
        return Err(ExplainError::WrongArity {
            expected: catalog.len(),
            found: codes.len(),
            features: catalog.feature_sequence().map(|s| s.to_string()).collect(),
        });
    }

    let mut resolved = Vec::with_capacity(codes.len());
    for (feature, code) in catalog.features().iter().zip(codes) {
        let code = code.as_ref();
        match feature.domain().iter().find(|c| c.as_str() == code) {
            Some(symbol) => resolved.push(*symbol),
            None => {
                return Err(ExplainError::UnknownCode {
                    feature: feature.name().to_string(),
                    code: code.to_string(),
                    domain: feature.domain().iter().map(|c| c.to_string()).collect(),
                })
            }
        }
    }

    let assignment = Assignment::from_codes(resolved);
    let input = assignment.render();

    let mut steps = Vec::new();
    let evaluation = evaluate_traced(assignment, constraints, |step| {
        steps.push(render_step(&step))
    });

    Ok(Explanation {
        input,
        result: evaluation.assignment.render(),
        valid: evaluation.is_valid(),
        blocker: evaluation.blocker().map(|b| b.to_string()),
        steps,
    })
}

fn render_step(step: &Step<'_>) -> String {
    let detail = match &step.outcome {
        StepOutcome::DomainSatisfied { value } => format!("{} is allowed", value),
        StepOutcome::DomainViolated { value } => format!("{} is not allowed, blocked", value),
        StepOutcome::ConditionFailed { condition, actual } => format!(
            "skipped, {} is {} not {}",
            condition.feature.name(),
            actual,
            condition.value
        ),
        StepOutcome::BlockSatisfied { action, value } => {
            format!("{} ({} is {}) holds", action, action.feature().name(), value)
        }
        StepOutcome::BlockViolated { action, value } => format!(
            "{} ({} is {}), blocked",
            action,
            action.feature().name(),
            value
        ),
        StepOutcome::Nulled { action, previous } => format!("{} (was {})", action, previous),
    };

    format!("#{} {}: {}", step.position + 1, step.constraint.blocker_id(), detail)
}
