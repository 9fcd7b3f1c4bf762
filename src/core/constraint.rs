//! Constraint rules.
//!
//! Constraints form a closed set of two kinds, decided when the declaration
//! is loaded:
//! - domain rules restrict a feature to a set of codes unconditionally
//! - conditional rules fire when every condition holds and then run their
//!   actions in order (block or null)
//!
//! Order inside a [`ConstraintSet`] is evaluation order, which in turn
//! decides which rule is reported as the blocker.

use std::fmt;

use crate::core::assignment::NULL_TOKEN;
use crate::core::errors::DeclarationError;
use crate::core::feature::FeatureCatalog;
use crate::util::Symbol;

/// A feature referenced by a rule, resolved against the catalog at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRef {
    name: Symbol,
    index: usize,
}

impl FeatureRef {
    /// Resolve `name` in `catalog`. `referenced_by` names the rule for the
    /// error message.
    pub fn resolve(
        catalog: &FeatureCatalog,
        name: &str,
        referenced_by: &str,
    ) -> Result<Self, DeclarationError> {
        match catalog.index_of(name) {
            Some(index) => Ok(FeatureRef {
                name: Symbol::new(name),
                index,
            }),
            None => Err(DeclarationError::UnknownFeature {
                feature: name.to_string(),
                referenced_by: referenced_by.to_string(),
                known: catalog.feature_sequence().map(|s| s.to_string()).collect(),
            }),
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Position of the feature in catalog order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// `feature == value`, tested against the assignment's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub feature: FeatureRef,
    pub value: Symbol,
}

/// What a conditional rule does once all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Invalidate the assignment unless the feature's value is allowed.
    Block {
        feature: FeatureRef,
        allowed_values: Vec<Symbol>,
    },
    /// Overwrite the feature's value with the null sentinel.
    Null { feature: FeatureRef },
}

impl Action {
    pub fn feature(&self) -> FeatureRef {
        match self {
            Action::Block { feature, .. } | Action::Null { feature } => *feature,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Block {
                feature,
                allowed_values,
            } => write!(
                f,
                "{} must be one of {}",
                feature.name(),
                format_values(allowed_values)
            ),
            Action::Null { feature } => write!(f, "set {} to {}", feature.name(), NULL_TOKEN),
        }
    }
}

/// Unconditional restriction of one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
    /// Optional identifier from the declaration.
    pub id: Option<Symbol>,
    pub feature: FeatureRef,
    pub allowed_values: Vec<Symbol>,
}

/// A rule that applies only when every condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRule {
    pub id: Symbol,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

/// One entry of the constraint set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Domain(DomainRule),
    Conditional(ConditionalRule),
}

impl Constraint {
    /// Identity reported when this constraint blocks an assignment.
    ///
    /// Domain rules without an explicit `id` are identified by the name of
    /// the feature they restrict.
    pub fn blocker_id(&self) -> Symbol {
        match self {
            Constraint::Domain(rule) => rule.id.unwrap_or(rule.feature.name()),
            Constraint::Conditional(rule) => rule.id,
        }
    }

    /// Human-readable one-line rendering.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Domain(rule) => write!(
                f,
                "{}: {} must be one of {}",
                self.blocker_id(),
                rule.feature.name(),
                format_values(&rule.allowed_values)
            ),
            Constraint::Conditional(rule) => {
                write!(f, "{}: ", rule.id)?;
                if rule.conditions.is_empty() {
                    f.write_str("always ")?;
                } else {
                    f.write_str("if ")?;
                    for (i, condition) in rule.conditions.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" and ")?;
                        }
                        write!(f, "{} = {}", condition.feature.name(), condition.value)?;
                    }
                    f.write_str(" then ")?;
                }
                if rule.actions.is_empty() {
                    return f.write_str("nothing");
                }
                for (i, action) in rule.actions.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", action)?;
                }
                Ok(())
            }
        }
    }
}

fn format_values(values: &[Symbol]) -> String {
    let joined: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
    format!("[{}]", joined.join(", "))
}

/// The ordered, immutable list of constraints.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        ConstraintSet { constraints }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get(index)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// One description per constraint, in evaluation order.
    pub fn descriptions(&self) -> Vec<String> {
        self.constraints.iter().map(Constraint::describe).collect()
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
