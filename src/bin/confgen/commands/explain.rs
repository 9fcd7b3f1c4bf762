//! `confgen explain` command

use anyhow::Result;

use crate::cli::{ExplainArgs, OutputFormat};
use crate::GlobalOptions;
use confgen::ConfigurationGenerator;

pub fn execute(args: ExplainArgs, global: &GlobalOptions) -> Result<()> {
    let path = global.ctx.resolve(&args.file);
    let generator = ConfigurationGenerator::load(&path)?;
    let explanation = generator.explain(args.values.as_slice())?;

    match global.format {
        OutputFormat::Human => print!("{}", explanation.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&explanation)?),
    }

    if let Some(blocker) = &explanation.blocker {
        tracing::debug!("{} blocked by {}", explanation.input, blocker);
    }
    Ok(())
}
