//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use confgen::util::shell::Coloring;

/// confgen - enumerate and validate product configurations
#[derive(Parser)]
#[command(name = "confgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<Coloring>,

    /// Output format for reports
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate every configuration and split it into valid and blocked
    Generate(GenerateArgs),

    /// Validate a declaration and summarize its features
    Check(CheckArgs),

    /// Evaluate one configuration and show what each constraint did
    Explain(ExplainArgs),

    /// Write a starter declaration
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Declaration file (JSON)
    pub file: PathBuf,

    /// Number of threads used to evaluate configurations
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Skip the "All possible configurations" section
    #[arg(long)]
    pub no_all: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Declaration file (JSON)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ExplainArgs {
    /// Declaration file (JSON)
    pub file: PathBuf,

    /// One value per feature, in declaration order
    #[arg(required = true, num_args = 1..)]
    pub values: Vec<String>,
}

#[derive(Args)]
pub struct InitArgs {
    /// File or directory to write to (defaults to ./configurations.json)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
