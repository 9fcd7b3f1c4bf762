//! `confgen init` command

use std::path::Path;

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use confgen::ops::init_declaration;
use confgen::util::shell::Status;

pub fn execute(args: InitArgs, global: &GlobalOptions) -> Result<()> {
    let path = match &args.path {
        Some(path) => global.ctx.resolve(path),
        None => global.ctx.cwd().to_path_buf(),
    };

    let written = init_declaration(&path)?;

    let shown = written
        .strip_prefix(global.ctx.cwd())
        .unwrap_or(Path::new(&written));
    global
        .shell
        .status(Status::Created, format!("declaration `{}`", shown.display()));
    global
        .shell
        .note(format!("run `confgen generate {}`", shown.display()));
    Ok(())
}
