//! Configuration generation.
//!
//! [`ConfigurationGenerator`] owns an immutable feature catalog and
//! constraint set and answers the public queries over them. The engine is a
//! pure function of those two inputs: every candidate is enumerated,
//! evaluated on its own copy of the assignment and rendered, so re-running
//! a query yields byte-identical output.

pub mod enumerate;
pub mod evaluate;
pub mod explain;

pub use enumerate::Enumerator;
pub use evaluate::{evaluate, evaluate_traced, Evaluation, Step, StepOutcome, Verdict};
pub use explain::{ExplainError, Explanation};

use std::collections::HashSet;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::core::constraint::ConstraintSet;
use crate::core::declaration::Declaration;
use crate::core::errors::DeclarationError;
use crate::core::feature::FeatureCatalog;

/// Tuning knobs that do not change results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Worker threads for evaluation. `None` or `Some(1)` evaluates
    /// sequentially.
    pub jobs: Option<usize>,
}

/// A rejected configuration and the constraint that rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedConfiguration {
    pub blocker: String,
    pub configuration: String,
}

impl From<BlockedConfiguration> for (String, String) {
    fn from(blocked: BlockedConfiguration) -> Self {
        (blocked.blocker, blocked.configuration)
    }
}

/// Result of [`ConfigurationGenerator::valid_and_blocked_configurations`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Rendered valid configurations, deduplicated, in first-seen order.
    pub valid: Vec<String>,
    /// One entry per blocked raw assignment, in enumeration order. Not
    /// deduplicated.
    pub blocked: Vec<BlockedConfiguration>,
}

impl Partition {
    pub fn into_pairs(self) -> (Vec<String>, Vec<(String, String)>) {
        (
            self.valid,
            self.blocked.into_iter().map(Into::into).collect(),
        )
    }

    /// Fold evaluations, in enumeration order, into a partition.
    fn from_evaluations(evaluations: impl IntoIterator<Item = Evaluation>) -> Self {
        let mut seen = HashSet::new();
        let mut partition = Partition::default();

        for evaluation in evaluations {
            let rendered = evaluation.assignment.render();
            match evaluation.verdict {
                Verdict::Valid => {
                    if seen.insert(rendered.clone()) {
                        partition.valid.push(rendered);
                    }
                }
                Verdict::Blocked { blocker, .. } => {
                    partition.blocked.push(BlockedConfiguration {
                        blocker: blocker.to_string(),
                        configuration: rendered,
                    });
                }
            }
        }

        partition
    }
}

/// Enumerates and validates the configurations of one declaration.
#[derive(Debug, Clone)]
pub struct ConfigurationGenerator {
    catalog: FeatureCatalog,
    constraints: ConstraintSet,
    options: GeneratorOptions,
}

impl ConfigurationGenerator {
    pub fn new(catalog: FeatureCatalog, constraints: ConstraintSet) -> Self {
        ConfigurationGenerator {
            catalog,
            constraints,
            options: GeneratorOptions::default(),
        }
    }

    /// Build a generator from a parsed declaration.
    pub fn from_declaration(declaration: &Declaration) -> Result<Self, DeclarationError> {
        let (catalog, constraints) = declaration.to_model()?;
        Ok(Self::new(catalog, constraints))
    }

    /// Load a declaration file and build a generator from it.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        Self::from_declaration(&Declaration::load(path)?)
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn options(&self) -> GeneratorOptions {
        self.options
    }

    /// Fresh enumeration of the raw Cartesian product.
    pub fn enumerate(&self) -> Enumerator<'_> {
        Enumerator::new(&self.catalog)
    }

    /// Every configuration of the product, unconstrained, rendered and
    /// deduplicated in first-seen order.
    pub fn all_configurations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let configurations: Vec<String> = self
            .enumerate()
            .map(|assignment| assignment.render())
            .filter(|rendered| seen.insert(rendered.clone()))
            .collect();

        tracing::debug!("Enumerated {} configurations", configurations.len());
        configurations
    }

    /// Run every raw assignment through the constraint set and split the
    /// results into valid configurations and blocked ones.
    pub fn valid_and_blocked_configurations(&self) -> Partition {
        let partition = match self.parallel_evaluations() {
            Some(evaluations) => Partition::from_evaluations(evaluations),
            None => Partition::from_evaluations(
                self.enumerate()
                    .map(|assignment| evaluate(assignment, &self.constraints)),
            ),
        };

        tracing::debug!(
            "Evaluated {} constraints: {} valid, {} blocked",
            self.constraints.len(),
            partition.valid.len(),
            partition.blocked.len()
        );
        partition
    }

    /// One human-readable line per constraint, in evaluation order.
    pub fn constraint_descriptions(&self) -> Vec<String> {
        self.constraints.descriptions()
    }

    /// Evaluate a single assignment given as one code per feature, recording
    /// what each constraint did.
    pub fn explain<S: AsRef<str>>(&self, codes: &[S]) -> Result<Explanation, ExplainError> {
        explain::explain(&self.catalog, &self.constraints, codes)
    }

    /// Evaluate the whole product on a rayon pool, preserving enumeration
    /// order. `None` means "evaluate sequentially".
    fn parallel_evaluations(&self) -> Option<Vec<Evaluation>> {
        let jobs = self.options.jobs.filter(|&jobs| jobs > 1)?;
        let total = self.catalog.product_size()?;

        let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Falling back to sequential evaluation: {}", e);
                return None;
            }
        };

        tracing::debug!("Evaluating {} candidates on {} threads", total, jobs);

        let evaluations: Vec<Evaluation> = pool.install(|| {
            (0..total)
                .into_par_iter()
                .filter_map(|ordinal| Enumerator::assignment_at(&self.catalog, ordinal))
                .map(|assignment| evaluate(assignment, &self.constraints))
                .collect()
        });
        Some(evaluations)
    }
}
