//! Implementation of the `templite check` command.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;
use templite::Template;

use super::{print_json, read_template, report_syntax_error};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<usize>,
}

/// Run the check command.
///
/// Exits with `NOINPUT` if any file could not be read, else `DATAERR` if any
/// file failed to compile.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());
    let mut code = exitcode::OK;

    for path in &args.files {
        let file = path.display().to_string();
        let text = match read_template(path) {
            Ok(text) => text,
            Err(read_code) => {
                code = read_code;
                results.push(CheckResult {
                    file,
                    ok: false,
                    error: Some("unreadable".into()),
                    offset: None,
                });
                continue;
            }
        };

        match Template::new(&text) {
            Ok(template) => {
                if !args.json {
                    let count = template.variables().free.len();
                    println!("{} {file} ({count} free variables)", "ok".green().bold());
                }
                results.push(CheckResult {
                    file,
                    ok: true,
                    error: None,
                    offset: None,
                });
            }
            Err(e) => {
                if code == exitcode::OK {
                    code = exitcode::DATAERR;
                }
                if !args.json {
                    println!("{} {file}", "error".red().bold());
                    report_syntax_error(&file, &text, &e);
                }
                results.push(CheckResult {
                    file,
                    ok: false,
                    error: Some(e.to_string()),
                    offset: Some(e.offset()),
                });
            }
        }
    }

    if args.json {
        print_json(&results)?;
    }
    Ok(code)
}
