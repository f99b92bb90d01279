//! Implementation of the `templite vars` command.

use std::path::PathBuf;

use templite::Template;

use super::{print_json, read_template, report_syntax_error};
use crate::output::table::format_variables_table;

/// Arguments for the vars command.
#[derive(Debug, clap::Args)]
pub struct VarsArgs {
    /// Template file to inspect
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the vars command.
pub fn run_vars(args: VarsArgs) -> miette::Result<i32> {
    let text = match read_template(&args.file) {
        Ok(text) => text,
        Err(code) => return Ok(code),
    };

    let template = match Template::new(&text) {
        Ok(template) => template,
        Err(e) => {
            report_syntax_error(&args.file.display().to_string(), &text, &e);
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        print_json(template.variables())?;
    } else {
        println!("{}", format_variables_table(template.variables()));
    }
    Ok(exitcode::OK)
}
