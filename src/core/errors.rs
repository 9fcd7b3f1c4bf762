//! Declaration error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic, DeclarationSyntaxError};

/// A declaration that cannot be turned into a catalog and constraint set.
///
/// Raised at load time, before any enumeration starts.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("failed to read declaration `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Syntax(Box<DeclarationSyntaxError>),

    #[error("declaration lists no features")]
    NoFeatures,

    #[error("feature name must not be empty")]
    EmptyFeatureName,

    #[error("duplicate feature `{name}`")]
    DuplicateFeature { name: String },

    #[error("feature `{feature}` has an empty domain")]
    EmptyDomain { feature: String },

    #[error("code `{code}` appears more than once in the domain of `{feature}`")]
    DuplicateCode { feature: String, code: String },

    #[error("{referenced_by} references unknown feature `{feature}`")]
    UnknownFeature {
        feature: String,
        referenced_by: String,
        known: Vec<String>,
    },

    #[error("{constraint} has an empty id")]
    EmptyConstraintId { constraint: String },
}

impl From<DeclarationSyntaxError> for DeclarationError {
    fn from(err: DeclarationSyntaxError) -> Self {
        DeclarationError::Syntax(Box::new(err))
    }
}

impl DeclarationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DeclarationError::Read { path, source } => {
                Diagnostic::error(format!("could not read declaration: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::CHECK_PATH)
                    .with_suggestion(suggestions::RUN_INIT)
            }

            DeclarationError::Syntax(err) => Diagnostic::error(err.message.clone())
                .with_context(format!("at line {} column {}", err.line, err.column))
                .with_suggestion(suggestions::DECLARATION_SHAPE),

            DeclarationError::NoFeatures => Diagnostic::error("declaration lists no features")
                .with_context("at least one feature is needed to enumerate configurations")
                .with_suggestion("Add an entry to `features` with a `name` and a `domain`"),

            DeclarationError::EmptyFeatureName => {
                Diagnostic::error("a feature has an empty name")
                    .with_suggestion("Give every feature a non-empty, unique `name`")
            }

            DeclarationError::DuplicateFeature { name } => {
                Diagnostic::error(format!("feature `{}` is declared more than once", name))
                    .with_context("feature names identify columns of a configuration")
                    .with_suggestion(format!("Rename or merge the duplicate `{}` entries", name))
            }

            DeclarationError::EmptyDomain { feature } => {
                Diagnostic::error(format!("feature `{}` has an empty domain", feature))
                    .with_context("an empty domain makes the Cartesian product empty")
                    .with_suggestion(format!("Add at least one code to `{}`.domain", feature))
            }

            DeclarationError::DuplicateCode { feature, code } => Diagnostic::error(format!(
                "code `{}` is listed twice in the domain of `{}`",
                code, feature
            ))
            .with_suggestion(format!("Remove the repeated `{}`", code)),

            DeclarationError::UnknownFeature {
                feature,
                referenced_by,
                known,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "{} references unknown feature `{}`",
                    referenced_by, feature
                ));

                if !known.is_empty() {
                    diag = diag.with_context(format!("known features: {}", known.join(", ")));
                }

                diag.with_suggestion("Check the spelling of the feature name")
                    .with_suggestion(suggestions::RUN_CHECK)
            }

            DeclarationError::EmptyConstraintId { constraint } => {
                Diagnostic::error(format!("{} has an empty id", constraint))
                    .with_context("the id is reported as the blocker of configurations it rejects")
                    .with_suggestion("Give the constraint a non-empty `id`")
            }
        }
    }
}
