//! Implementation of the `templite render` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use serde::Serialize;
use templite::Template;
use tracing::debug;

use super::{print_json, read_template, report_syntax_error};
use crate::context::{build_context, parse_param, ContextError};

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template file to render
    #[arg(required_unless_present = "template", conflicts_with = "template")]
    pub file: Option<PathBuf>,

    /// Template text given inline instead of a file
    #[arg(long)]
    pub template: Option<String>,

    /// JSON file holding an object of context values
    #[arg(long, env = "TEMPLITE_CONTEXT")]
    pub context: Option<PathBuf>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Do not provide the standard filters
    #[arg(long)]
    pub no_filters: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
struct RenderOutput {
    output: String,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let (name, text) = match (&args.file, args.template) {
        (Some(path), _) => match read_template(path) {
            Ok(text) => (path.display().to_string(), text),
            Err(code) => return Ok(code),
        },
        (None, Some(text)) => ("<template>".to_string(), text),
        (None, None) => return Ok(exitcode::USAGE),
    };

    let context = match build_context(!args.no_filters, args.context.as_deref(), args.params) {
        Ok(context) => context,
        Err(e) => {
            let code = match e {
                ContextError::Read { .. } => exitcode::NOINPUT,
                ContextError::Json { .. } | ContextError::NotAnObject { .. } => exitcode::DATAERR,
            };
            eprintln!("{:?}", Report::new(e));
            return Ok(code);
        }
    };
    debug!(names = context.len(), "built context");

    let template = match Template::with_contexts(&text, [context]) {
        Ok(template) => template,
        Err(e) => {
            if args.json {
                print_error_json(&e.to_string())?;
            } else {
                report_syntax_error(&name, &text, &e);
            }
            return Ok(exitcode::DATAERR);
        }
    };

    match template.render_default() {
        Ok(output) => {
            if args.json {
                print_json(&RenderOutput { output })?;
            } else {
                print!("{output}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                print_error_json(&e.to_string())?;
            } else {
                eprintln!("Render error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

fn print_error_json(message: &str) -> miette::Result<()> {
    let output = serde_json::json!({ "error": message });
    let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
    eprintln!("{json}");
    Ok(())
}
