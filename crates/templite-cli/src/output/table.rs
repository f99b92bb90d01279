//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use templite::Variables;

/// Format the variables of a template as a two-column table.
pub fn format_variables_table(variables: &Variables) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind"]);

    for name in &variables.free {
        table.add_row(vec![name.as_str(), "free"]);
    }
    for name in &variables.loop_bound {
        table.add_row(vec![name.as_str(), "loop"]);
    }

    table
}
