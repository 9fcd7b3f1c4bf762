//! confgen CLI - enumerate and validate product configurations

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, OutputFormat};
use confgen::generator::ExplainError;
use confgen::util::diagnostic::{emit, render_report};
use confgen::util::shell::{Coloring, Shell};
use confgen::util::{Config, GlobalContext};
use confgen::DeclarationError;

/// State shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
    pub config: Config,
    pub format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let global = match GlobalOptions::from_cli(&cli) {
        Ok(global) => global,
        Err(e) => fail(&e, Coloring::Auto.resolve()),
    };

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &global),
        Commands::Check(args) => commands::check::execute(args, &global),
        Commands::Explain(args) => commands::explain::execute(args, &global),
        Commands::Init(args) => commands::init::execute(args, &global),
        Commands::Completions(args) => commands::completions::execute(args),
    };

    if let Err(e) = result {
        // JSON consumers read stdout only
        global.shell.json_error(format!("{:#}", e));
        fail(&e, global.ctx.color());
    }
}

fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "confgen=debug"
    } else if cli.quiet {
        "confgen=error"
    } else {
        "confgen=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

impl GlobalOptions {
    /// Merge the config files with the global flags. Flags win.
    fn from_cli(cli: &Cli) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;
        let config = ctx.config();

        let coloring = match (cli.color, config.output.color.as_deref()) {
            (Some(coloring), _) => coloring,
            (None, Some(name)) => name
                .parse::<Coloring>()
                .map_err(|e| anyhow!("invalid `output.color` in config: {}", e))?,
            (None, None) => Coloring::Auto,
        };
        let format = match (cli.format, config.output.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true)
                .map_err(|e| anyhow!("invalid `output.format` in config: {}", e))?,
            (None, None) => OutputFormat::Human,
        };

        let shell = Shell::new(cli.quiet, format == OutputFormat::Json, coloring);
        // Diagnostics follow --color even when the shell itself is in JSON mode.
        ctx.set_color(coloring.resolve());

        Ok(GlobalOptions {
            shell,
            ctx,
            config,
            format,
        })
    }
}

/// Print `err` to stderr, as a diagnostic when it is one, and exit with 1.
fn fail(err: &anyhow::Error, color: bool) -> ! {
    if let Some(err) = err.downcast_ref::<DeclarationError>() {
        match err {
            DeclarationError::Syntax(syntax) => eprint!("{}", render_report(&**syntax, color)),
            other => emit(&other.to_diagnostic(), color),
        }
    } else if let Some(err) = err.downcast_ref::<ExplainError>() {
        emit(&err.to_diagnostic(), color);
    } else {
        eprintln!("error: {:#}", err);
    }
    std::process::exit(1);
}
