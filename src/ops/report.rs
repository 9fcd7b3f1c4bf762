//! Reports printed by `confgen generate` and `confgen check`.
//!
//! The text layout numbers entries from 1 and prints one section per query:
//!
//! ```text
//! All possible configurations 4:
//! 1. x/p
//! ...
//!
//! Valid configurations:
//! 1. x/p
//!
//! Blocked configurations:
//! 1. Blocked by (B): x/q
//!
//! Constraints description:
//! B: B must be one of [p]
//! ```

use std::fmt::Write as _;

use serde::Serialize;

use crate::generator::{BlockedConfiguration, ConfigurationGenerator};

/// Options for building a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include the unconstrained "all configurations" section.
    pub show_all: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions { show_all: true }
    }
}

/// The results of every query over one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<String>>,
    pub valid: Vec<String>,
    pub blocked: Vec<BlockedConfiguration>,
    pub constraints: Vec<String>,
}

impl Report {
    /// Run the queries of `generator`.
    pub fn generate(generator: &ConfigurationGenerator, opts: ReportOptions) -> Self {
        let all = opts.show_all.then(|| generator.all_configurations());
        let partition = generator.valid_and_blocked_configurations();

        Report {
            all,
            valid: partition.valid,
            blocked: partition.blocked,
            constraints: generator.constraint_descriptions(),
        }
    }

    /// Render the human-readable report.
    pub fn render_text(&self) -> String {
        let mut sections = Vec::with_capacity(4);

        if let Some(all) = &self.all {
            sections.push(numbered(
                &format!("All possible configurations {}:", all.len()),
                all.iter(),
            ));
        }

        sections.push(numbered("Valid configurations:", self.valid.iter()));
        sections.push(numbered(
            "Blocked configurations:",
            self.blocked
                .iter()
                .map(|b| format!("Blocked by ({}): {}", b.blocker, b.configuration)),
        ));

        let mut descriptions = String::from("Constraints description:\n");
        for description in &self.constraints {
            descriptions.push_str(description);
            descriptions.push('\n');
        }
        sections.push(descriptions);

        sections.join("\n")
    }

    /// Render the report as pretty-printed JSON.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn numbered<T: std::fmt::Display>(heading: &str, items: impl Iterator<Item = T>) -> String {
    let mut out = String::new();
    out.push_str(heading);
    out.push('\n');
    for (idx, item) in items.enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, item);
    }
    out
}

/// Shape of a declaration, as printed by `confgen check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Feature names with their domain sizes, in catalog order.
    pub features: Vec<(String, usize)>,
    pub constraints: usize,
    /// Size of the raw Cartesian product. `None` if it overflows a `u64`.
    pub product_size: Option<u64>,
}

impl Summary {
    pub fn of(generator: &ConfigurationGenerator) -> Self {
        let catalog = generator.catalog();
        Summary {
            features: catalog
                .features()
                .iter()
                .map(|f| (f.name().to_string(), f.domain().len()))
                .collect(),
            constraints: generator.constraints().len(),
            product_size: catalog.product_size(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Features {}:", self.features.len());
        for (idx, (name, size)) in self.features.iter().enumerate() {
            let _ = writeln!(out, "{}. {} ({} values)", idx + 1, name, size);
        }
        let _ = writeln!(out, "Constraints: {}", self.constraints);
        let _ = match self.product_size {
            Some(size) => writeln!(out, "Raw configurations: {}", size),
            None => writeln!(out, "Raw configurations: more than {}", u64::MAX),
        };
        out
    }
}
