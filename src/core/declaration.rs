//! The JSON declaration of features and constraints.
//!
//! The declaration shape is an external contract:
//!
//! ```json
//! {
//!   "features": [{ "name": "A", "domain": ["x", "y"] }],
//!   "constraints": [
//!     { "rule_type": "domain", "feature": "A", "allowed_values": ["x"] },
//!     {
//!       "rule_type": "conditional",
//!       "id": "C1",
//!       "conditions": [{ "feature": "A", "value": "x" }],
//!       "actions": [{ "feature": "B", "mode": "null" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading goes through two stages: serde maps the text onto the types in
//! this module (rejecting unknown `rule_type` and `mode` tags and missing
//! keys), then [`Declaration::to_model`] resolves every feature reference
//! and validates the catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::assignment::NULL_TOKEN;
use crate::core::constraint::{
    Action, Condition, ConditionalRule, Constraint, ConstraintSet, DomainRule, FeatureRef,
};
use crate::core::errors::DeclarationError;
use crate::core::feature::{Feature, FeatureCatalog};
use crate::util::diagnostic::DeclarationSyntaxError;
use crate::util::Symbol;

/// Top-level declaration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub features: Vec<FeatureDecl>,
    pub constraints: Vec<ConstraintDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDecl {
    pub name: String,
    pub domain: Vec<String>,
}

/// A constraint as written in the declaration, dispatched on `rule_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule_type", rename_all = "lowercase")]
pub enum ConstraintDecl {
    Domain {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        feature: String,
        allowed_values: Vec<String>,
    },
    Conditional {
        id: String,
        conditions: Vec<ConditionDecl>,
        actions: Vec<ActionDecl>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDecl {
    pub feature: String,
    pub value: String,
}

/// An action as written in the declaration, dispatched on `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ActionDecl {
    Block {
        feature: String,
        allowed_values: Vec<String>,
    },
    Null {
        feature: String,
    },
}

impl Declaration {
    /// Parse a declaration from JSON text. `name` labels error reports.
    pub fn from_json(name: &str, text: &str) -> Result<Self, DeclarationError> {
        serde_json::from_str(text)
            .map_err(|e| DeclarationSyntaxError::from_json(name, text, &e).into())
    }

    /// Read and parse a declaration file.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        let text = std::fs::read_to_string(path).map_err(|source| DeclarationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let declaration = Self::from_json(&path.display().to_string(), &text)?;

        tracing::debug!(
            "Loaded {} features and {} constraints from {}",
            declaration.features.len(),
            declaration.constraints.len(),
            path.display()
        );

        Ok(declaration)
    }

    /// Serialize back to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Resolve references and build the immutable catalog and constraint set.
    pub fn to_model(&self) -> Result<(FeatureCatalog, ConstraintSet), DeclarationError> {
        let features = self
            .features
            .iter()
            .map(|f| Feature::new(f.name.as_str(), f.domain.iter().map(Symbol::new)))
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = FeatureCatalog::new(features)?;

        let constraints = self
            .constraints
            .iter()
            .enumerate()
            .map(|(i, decl)| decl.resolve(&catalog, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((catalog, ConstraintSet::new(constraints)))
    }

    /// A small, self-explanatory declaration used by `confgen init`.
    pub fn starter() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Declaration {
            features: vec![
                FeatureDecl {
                    name: "Frame".to_string(),
                    domain: strings(&["S", "M", "L"]),
                },
                FeatureDecl {
                    name: "Motor".to_string(),
                    domain: strings(&["250W", "500W"]),
                },
                FeatureDecl {
                    name: "Rack".to_string(),
                    domain: strings(&["none", "rear"]),
                },
            ],
            constraints: vec![
                ConstraintDecl::Domain {
                    id: None,
                    feature: "Motor".to_string(),
                    allowed_values: strings(&["250W", "500W"]),
                },
                ConstraintDecl::Conditional {
                    id: "small-frame-motor".to_string(),
                    conditions: vec![ConditionDecl {
                        feature: "Frame".to_string(),
                        value: "S".to_string(),
                    }],
                    actions: vec![ActionDecl::Block {
                        feature: "Motor".to_string(),
                        allowed_values: strings(&["250W"]),
                    }],
                },
                ConstraintDecl::Conditional {
                    id: "no-rack-on-small".to_string(),
                    conditions: vec![ConditionDecl {
                        feature: "Frame".to_string(),
                        value: "S".to_string(),
                    }],
                    actions: vec![ActionDecl::Null {
                        feature: "Rack".to_string(),
                    }],
                },
            ],
        }
    }
}

impl ConstraintDecl {
    /// Human label used in error messages, e.g. `constraint #2 (C1)`.
    fn label(&self, position: usize) -> String {
        match self {
            ConstraintDecl::Domain { id: Some(id), .. } | ConstraintDecl::Conditional { id, .. } => {
                format!("constraint #{} ({})", position, id)
            }
            ConstraintDecl::Domain { id: None, .. } => format!("constraint #{}", position),
        }
    }

    fn resolve(
        &self,
        catalog: &FeatureCatalog,
        position: usize,
    ) -> Result<Constraint, DeclarationError> {
        let label = self.label(position);

        match self {
            ConstraintDecl::Domain {
                id,
                feature,
                allowed_values,
            } => {
                if matches!(id, Some(id) if id.trim().is_empty()) {
                    return Err(DeclarationError::EmptyConstraintId { constraint: label });
                }
                let feature = FeatureRef::resolve(catalog, feature, &label)?;
                let allowed_values = symbols(allowed_values);
                warn_outside_domain(catalog, feature, &allowed_values, &label);

                Ok(Constraint::Domain(DomainRule {
                    id: id.as_deref().map(Symbol::new),
                    feature,
                    allowed_values,
                }))
            }

            ConstraintDecl::Conditional {
                id,
                conditions,
                actions,
            } => {
                if id.trim().is_empty() {
                    return Err(DeclarationError::EmptyConstraintId { constraint: label });
                }

                let conditions = conditions
                    .iter()
                    .map(|c| {
                        let context = format!("condition of {}", label);
                        let feature = FeatureRef::resolve(catalog, &c.feature, &context)?;
                        let value = Symbol::new(&c.value);
                        warn_outside_domain(catalog, feature, &[value], &label);
                        Ok(Condition { feature, value })
                    })
                    .collect::<Result<Vec<_>, DeclarationError>>()?;

                let actions = actions
                    .iter()
                    .map(|a| {
                        let context = format!("action of {}", label);
                        Ok(match a {
                            ActionDecl::Block {
                                feature,
                                allowed_values,
                            } => {
                                let feature = FeatureRef::resolve(catalog, feature, &context)?;
                                let allowed_values = symbols(allowed_values);
                                warn_outside_domain(catalog, feature, &allowed_values, &label);
                                Action::Block {
                                    feature,
                                    allowed_values,
                                }
                            }
                            ActionDecl::Null { feature } => Action::Null {
                                feature: FeatureRef::resolve(catalog, feature, &context)?,
                            },
                        })
                    })
                    .collect::<Result<Vec<_>, DeclarationError>>()?;

                Ok(Constraint::Conditional(ConditionalRule {
                    id: Symbol::new(id),
                    conditions,
                    actions,
                }))
            }
        }
    }
}

fn symbols(values: &[String]) -> Vec<Symbol> {
    let mut out: Vec<Symbol> = Vec::with_capacity(values.len());
    for value in values {
        let symbol = Symbol::new(value);
        if !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}

/// Literals outside the feature's domain are legal but can only ever match
/// a nulled value (`None`) or nothing at all.
fn warn_outside_domain(
    catalog: &FeatureCatalog,
    feature: FeatureRef,
    values: &[Symbol],
    label: &str,
) {
    let Some(decl) = catalog.get(feature.index()) else {
        return;
    };
    for value in values {
        if *value != NULL_TOKEN && !decl.contains(*value) {
            tracing::warn!(
                "{} uses `{}` which is not in the domain of `{}`",
                label,
                value,
                feature.name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures;

    #[test]
    fn test_parse_and_resolve() {
        let decl = Declaration::from_json("test", fixtures::NULL_ACTION).unwrap();
        let (catalog, constraints) = decl.to_model().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(constraints.len(), 1);
        match constraints.get(0).unwrap() {
            Constraint::Conditional(rule) => {
                assert_eq!(rule.id, "C1");
                assert_eq!(rule.conditions[0].feature.index(), 0);
                assert!(matches!(rule.actions[0], Action::Null { feature } if feature.index() == 1));
            }
            other => panic!("expected conditional, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_rule_type_rejected_at_load() {
        let err = Declaration::from_json("test", fixtures::UNKNOWN_RULE_TYPE).unwrap_err();
        match err {
            DeclarationError::Syntax(syntax) => {
                assert!(syntax.message.contains("unknown variant `range`"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_mode_rejected() {
        let text = r#"{
            "features": [{ "name": "A", "domain": ["x"] }],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [],
                "actions": [{ "feature": "A", "mode": "hide" }]
            }]
        }"#;
        let err = Declaration::from_json("test", text).unwrap_err();
        assert!(err.to_string().contains("unknown variant `hide`"));
    }

    #[test]
    fn test_block_without_allowed_values_rejected() {
        let text = r#"{
            "features": [{ "name": "A", "domain": ["x"] }],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [],
                "actions": [{ "feature": "A", "mode": "block" }]
            }]
        }"#;
        let err = Declaration::from_json("test", text).unwrap_err();
        assert!(err.to_string().contains("allowed_values"));
    }

    #[test]
    fn test_null_action_ignores_allowed_values() {
        let text = r#"{
            "features": [{ "name": "A", "domain": ["x"] }],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [],
                "actions": [{ "feature": "A", "mode": "null", "allowed_values": ["x"] }]
            }]
        }"#;
        let decl = Declaration::from_json("test", text).unwrap();
        assert!(decl.to_model().is_ok());
    }

    #[test]
    fn test_missing_constraints_key_rejected() {
        let text = r#"{ "features": [{ "name": "A", "domain": ["x"] }] }"#;
        let err = Declaration::from_json("test", text).unwrap_err();
        assert!(err.to_string().contains("missing field `constraints`"));
    }

    #[test]
    fn test_unknown_feature_in_action() {
        let text = r#"{
            "features": [{ "name": "A", "domain": ["x"] }],
            "constraints": [{
                "rule_type": "conditional", "id": "C1",
                "conditions": [{ "feature": "A", "value": "x" }],
                "actions": [{ "feature": "B", "mode": "null" }]
            }]
        }"#;
        let err = Declaration::from_json("test", text)
            .unwrap()
            .to_model()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "action of constraint #1 (C1) references unknown feature `B`"
        );
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let err = Declaration::from_json("test", fixtures::DUPLICATE_FEATURE)
            .unwrap()
            .to_model()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::DuplicateFeature { .. }));
    }

    #[test]
    fn test_domain_id_is_optional() {
        let decl = Declaration::from_json("test", fixtures::DOMAIN_RESTRICTION).unwrap();
        let (_, constraints) = decl.to_model().unwrap();
        assert_eq!(constraints.get(0).unwrap().blocker_id(), "B");
    }

    #[test]
    fn test_empty_conditional_id_rejected() {
        let text = r#"{
            "features": [{ "name": "A", "domain": ["x"] }],
            "constraints": [{
                "rule_type": "conditional", "id": " ",
                "conditions": [], "actions": []
            }]
        }"#;
        let err = Declaration::from_json("test", text)
            .unwrap()
            .to_model()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::EmptyConstraintId { .. }));
    }

    #[test]
    fn test_repeated_allowed_values_collapse() {
        assert_eq!(
            symbols(&["p".to_string(), "q".to_string(), "p".to_string()]),
            vec![Symbol::new("p"), Symbol::new("q")]
        );
    }

    #[test]
    fn test_starter_round_trips_and_resolves() {
        let starter = Declaration::starter();
        let text = starter.to_json_pretty().unwrap();
        let parsed = Declaration::from_json("starter", &text).unwrap();

        assert_eq!(parsed, starter);
        assert!(!text.contains("\"id\": null"));
        assert!(parsed.to_model().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Declaration::load(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DeclarationError::Read { .. }));
    }
}
