//! User-facing diagnostics.
//!
//! Every error that reaches the user carries the root cause, the context
//! that explains it and a numbered list of fixes.

use std::fmt;
use std::path::PathBuf;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource,
    SourceSpan,
};
use thiserror::Error;

/// Common suggestion messages.
pub mod suggestions {
    /// The declaration could not be found or read.
    pub const CHECK_PATH: &str = "Check that the declaration path is correct and readable";

    /// A starter declaration can be generated.
    pub const RUN_INIT: &str = "Run `confgen init` to write a starter declaration";

    /// The shape of the declaration is wrong.
    pub const DECLARATION_SHAPE: &str =
        "A declaration is an object with `features` and `constraints` arrays";

    /// A reference does not resolve.
    pub const RUN_CHECK: &str = "Run `confgen check <FILE>` to list the declared features";
}

/// An error message with context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Declaration file the diagnostic is about
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let label = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", label, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// A declaration that is not valid JSON or does not have the expected shape.
///
/// Carries the source text so the offending position can be labelled.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid declaration: {message}")]
#[diagnostic(
    code(confgen::declaration::parse),
    help("A declaration is an object with `features` and `constraints` arrays")
)]
pub struct DeclarationSyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl DeclarationSyntaxError {
    /// Wrap a serde_json error, pointing the label at its line and column.
    pub fn from_json(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        let offset = byte_offset(source, line, column);
        DeclarationSyntaxError {
            message: err.to_string(),
            line,
            column,
            src: NamedSource::new(name, source.to_string()),
            span: (offset, 0).into(),
        }
    }
}

/// Convert a 1-based line/column pair into a byte offset clamped to `source`.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(source.len());
        }
        offset += text.len();
    }
    source.len()
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Render a miette diagnostic with source snippet and labels.
pub fn render_report(diagnostic: &dyn MietteDiagnostic, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(theme);
    if handler.render_report(&mut out, diagnostic).is_err() {
        out = format!("error: {}\n", diagnostic);
    }
    out
}
