//! Core data model for confgen.
//!
//! This module contains the types every query is computed from:
//! - Features and the ordered catalog
//! - Constraint rules and the ordered constraint set
//! - Candidate assignments and their rendering
//! - The on-disk declaration format

pub mod assignment;
pub mod constraint;
pub mod declaration;
pub mod errors;
pub mod feature;

pub use assignment::{Assignment, Value, NULL_TOKEN, SEPARATOR};
pub use constraint::{Action, Condition, Constraint, ConstraintSet};
pub use declaration::Declaration;
pub use errors::DeclarationError;
pub use feature::{Feature, FeatureCatalog};
