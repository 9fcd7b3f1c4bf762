//! Test utilities for confgen unit tests.
//!
//! Provides declaration fixtures and helpers that write them to a temporary
//! directory or turn them straight into a generator.

pub mod fixtures;

use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::declaration::Declaration;
use crate::generator::ConfigurationGenerator;

/// Build a generator from declaration JSON, panicking on invalid input.
pub fn generator(text: &str) -> ConfigurationGenerator {
    let declaration = Declaration::from_json("fixture", text).expect("fixture parses");
    ConfigurationGenerator::from_declaration(&declaration).expect("fixture resolves")
}

/// Write `text` to `<tmp>/<name>` and return the path.
///
/// The directory lives as long as the returned `TempDir`.
pub fn write_declaration(name: &str, text: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("temp dir");
    let path = tmp.path().join(name);
    std::fs::write(&path, text).expect("write fixture");
    (tmp, path)
}
