//! CLI command implementations.

mod check;
mod render;
mod vars;

use std::fs::read_to_string;
use std::path::Path;

use miette::{IntoDiagnostic, Report};
use serde::Serialize;
use templite::SyntaxError;

use crate::output::TemplateDiagnostic;

pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
pub use vars::{run_vars, VarsArgs};

/// Read a template file, printing the failure and returning the exit code on
/// error.
fn read_template(path: &Path) -> Result<String, i32> {
    read_to_string(path).map_err(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        exitcode::NOINPUT
    })
}

/// Print a syntax error against its source with miette.
fn report_syntax_error(name: &str, content: &str, err: &SyntaxError) {
    let diagnostic = TemplateDiagnostic::from_syntax_error(name, content, err);
    eprintln!("{:?}", Report::new(diagnostic));
}

/// Print `value` as pretty JSON on stdout.
fn print_json(value: &impl Serialize) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
