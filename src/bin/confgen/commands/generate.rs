//! `confgen generate` command

use anyhow::Result;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::GlobalOptions;
use confgen::ops::{Report, ReportOptions};
use confgen::util::shell::Status;
use confgen::{ConfigurationGenerator, GeneratorOptions};

pub fn execute(args: GenerateArgs, global: &GlobalOptions) -> Result<()> {
    let shell = &global.shell;
    let path = global.ctx.resolve(&args.file);

    // Jobs: CLI > config > sequential
    let jobs = args.jobs.or(global.config.generate.jobs);
    let show_all = !args.no_all && global.config.show_all();

    shell.status(Status::Loading, args.file.display());
    let generator =
        ConfigurationGenerator::load(&path)?.with_options(GeneratorOptions { jobs });

    shell.status(
        Status::Generating,
        format!(
            "{} features, {} constraints",
            generator.catalog().len(),
            generator.constraints().len()
        ),
    );
    let report = Report::generate(&generator, ReportOptions { show_all });

    match global.format {
        OutputFormat::Human => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    shell.status(
        Status::Finished,
        format!(
            "{} valid, {} blocked",
            report.valid.len(),
            report.blocked.len()
        ),
    );
    Ok(())
}
