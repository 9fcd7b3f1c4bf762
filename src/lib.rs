//! confgen - enumerate and validate product configurations
//!
//! This crate provides the library behind the `confgen` CLI: a feature
//! catalog, an ordered constraint set, and the generator that enumerates the
//! Cartesian product and classifies each configuration as valid or blocked.

pub mod core;
pub mod generator;
pub mod ops;
pub mod util;

/// Test utilities for confgen unit tests.
///
/// Only available when compiling tests. Provides declaration fixtures and
/// helpers that write them to temporary directories.
#[cfg(test)]
pub mod test_support;

pub use core::{
    constraint::ConstraintSet, declaration::Declaration, errors::DeclarationError,
    feature::FeatureCatalog,
};

pub use generator::{ConfigurationGenerator, GeneratorOptions, Partition};
pub use util::context::GlobalContext;
