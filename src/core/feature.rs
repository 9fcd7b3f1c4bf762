//! Features and the ordered feature catalog.

use std::collections::{HashMap, HashSet};

use crate::core::errors::DeclarationError;
use crate::util::Symbol;

/// A named configuration dimension with a finite, ordered domain of codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    name: Symbol,
    domain: Vec<Symbol>,
}

impl Feature {
    /// Create a feature, rejecting empty names, empty domains and repeated codes.
    pub fn new(
        name: impl Into<Symbol>,
        domain: impl IntoIterator<Item = Symbol>,
    ) -> Result<Self, DeclarationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DeclarationError::EmptyFeatureName);
        }

        let domain: Vec<Symbol> = domain.into_iter().collect();
        if domain.is_empty() {
            return Err(DeclarationError::EmptyDomain {
                feature: name.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for code in &domain {
            if !seen.insert(*code) {
                return Err(DeclarationError::DuplicateCode {
                    feature: name.to_string(),
                    code: code.to_string(),
                });
            }
        }

        Ok(Feature { name, domain })
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn domain(&self) -> &[Symbol] {
        &self.domain
    }

    pub fn contains(&self, code: Symbol) -> bool {
        self.domain.contains(&code)
    }
}

/// The ordered list of features.
///
/// Order is authoritative: it drives enumeration order and the order of
/// tokens in a rendered configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
    positions: HashMap<Symbol, usize>,
}

impl FeatureCatalog {
    /// Build a catalog, rejecting an empty list and duplicate feature names.
    pub fn new(features: Vec<Feature>) -> Result<Self, DeclarationError> {
        if features.is_empty() {
            return Err(DeclarationError::NoFeatures);
        }

        let mut positions = HashMap::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            if positions.insert(feature.name, index).is_some() {
                return Err(DeclarationError::DuplicateFeature {
                    name: feature.name.to_string(),
                });
            }
        }

        Ok(FeatureCatalog {
            features,
            positions,
        })
    }

    /// Position of the feature called `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Feature names in catalog order.
    pub fn feature_sequence(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.features.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of raw assignments in the Cartesian product, or `None` if it
    /// does not fit in a `u64`.
    pub fn product_size(&self) -> Option<u64> {
        self.features
            .iter()
            .try_fold(1u64, |acc, f| acc.checked_mul(f.domain.len() as u64))
    }
}
