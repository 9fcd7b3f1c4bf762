//! Progress lines on stderr.
//!
//! Commands print their report to stdout themselves. The shell only adds
//! status lines around it, such as `     Loading product.json`, plus an error
//! record on stdout when the report is JSON.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::str::FromStr;

use serde::Serialize;

/// `--color` / `output.color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coloring {
    #[default]
    Auto,
    Always,
    Never,
}

impl Coloring {
    /// Whether stderr output should carry ANSI styles.
    pub fn resolve(self) -> bool {
        match self {
            Coloring::Auto => io::stderr().is_terminal(),
            Coloring::Always => true,
            Coloring::Never => false,
        }
    }
}

impl FromStr for Coloring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Coloring::Auto),
            "always" => Ok(Coloring::Always),
            "never" => Ok(Coloring::Never),
            other => Err(format!("`{}` is not one of auto, always, never", other)),
        }
    }
}

/// What a status line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Generating,
    Finished,
    Checked,
    Created,
    Note,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Loading => "Loading",
            Status::Generating => "Generating",
            Status::Finished => "Finished",
            Status::Checked => "Checked",
            Status::Created => "Created",
            Status::Note => "Note",
        }
    }

    fn style(self) -> &'static str {
        match self {
            Status::Loading | Status::Generating => "\x1b[1;36m",
            Status::Finished | Status::Checked | Status::Created => "\x1b[1;32m",
            Status::Note => "\x1b[1;34m",
        }
    }
}

/// Labels are right-aligned to this column.
const LABEL_WIDTH: usize = 12;

/// How much the shell prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Normal,
    Quiet,
    /// Status lines are dropped and failures become an [`ErrorRecord`].
    Json,
}

/// Failure line written to stdout in JSON mode.
#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    error: &'a str,
}

#[derive(Debug)]
pub struct Shell {
    output: Output,
    color: bool,
}

impl Shell {
    /// `json` wins over `quiet`.
    pub fn new(quiet: bool, json: bool, coloring: Coloring) -> Self {
        let output = match (json, quiet) {
            (true, _) => Output::Json,
            (false, true) => Output::Quiet,
            (false, false) => Output::Normal,
        };
        Shell {
            output,
            color: output != Output::Json && coloring.resolve(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.output == Output::Json
    }

    pub fn use_color(&self) -> bool {
        self.color
    }

    pub fn status(&self, status: Status, msg: impl Display) {
        if let Some(line) = self.status_line(status, msg) {
            eprintln!("{}", line);
        }
    }

    pub fn note(&self, msg: impl Display) {
        self.status(Status::Note, msg);
    }

    /// Report a failure on stdout for JSON consumers. Human-mode failures
    /// are printed by the caller as diagnostics.
    pub fn json_error(&self, msg: impl Display) {
        if !self.is_json() {
            return;
        }
        let message = msg.to_string();
        match serde_json::to_string(&ErrorRecord { error: &message }) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("cannot encode error record: {}", e),
        }
    }

    fn status_line(&self, status: Status, msg: impl Display) -> Option<String> {
        if self.output != Output::Normal {
            return None;
        }
        let label = format!("{:>width$}", status.label(), width = LABEL_WIDTH);
        Some(if self.color {
            format!("{}{}\x1b[0m {}", status.style(), label, msg)
        } else {
            format!("{} {}", label, msg)
        })
    }
}
