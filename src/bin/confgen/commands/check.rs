//! `confgen check` command

use anyhow::Result;

use crate::cli::{CheckArgs, OutputFormat};
use crate::GlobalOptions;
use confgen::ops::Summary;
use confgen::util::shell::Status;
use confgen::ConfigurationGenerator;

pub fn execute(args: CheckArgs, global: &GlobalOptions) -> Result<()> {
    let path = global.ctx.resolve(&args.file);
    let generator = ConfigurationGenerator::load(&path)?;
    let summary = Summary::of(&generator);

    match global.format {
        OutputFormat::Human => print!("{}", summary.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    global
        .shell
        .status(Status::Checked, args.file.display());
    Ok(())
}
