//! Implementation of `confgen init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::declaration::Declaration;

/// File name used when `confgen init` is given a directory.
pub const DEFAULT_DECLARATION_NAME: &str = "configurations.json";

/// Write a starter declaration to `path`.
///
/// A directory (existing, or a path ending in a separator) receives
/// [`DEFAULT_DECLARATION_NAME`]. Existing files are never overwritten.
/// Returns the path written.
pub fn init_declaration(path: &Path) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(DEFAULT_DECLARATION_NAME)
    } else {
        path.to_path_buf()
    };

    if target.exists() {
        bail!(
            "destination `{}` already exists\n\
             \n\
             Pick another path or remove the existing file.",
            target.display()
        );
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    let mut contents = Declaration::starter()
        .to_json_pretty()
        .context("failed to serialize starter declaration")?;
    contents.push('\n');

    fs::write(&target, contents)
        .with_context(|| format!("failed to write {}", target.display()))?;

    tracing::debug!("Wrote starter declaration to {}", target.display());
    Ok(target)
}
