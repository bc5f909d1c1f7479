use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::component::ComponentReport;

/// Width of a tab stop when lining up the text report.
const TAB_WIDTH: usize = 8;

/// Renders the `status` report. An empty report renders as an empty
/// string in text and table format.
pub fn render(
    reports: &[ComponentReport],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Table => Ok(render_table(reports)),
        OutputFormat::Json => serde_json::to_string_pretty(reports),
    }
}

/// `<component>\t<status>` per line. Components are padded with tabs only,
/// up to a shared tab stop, so the status column lines up on a terminal and
/// each line still splits on `\t` into exactly two fields.
fn render_text(reports: &[ComponentReport]) -> String {
    let widest = reports
        .iter()
        .map(|report| report.component.chars().count())
        .max()
        .unwrap_or(0);
    let column = (widest + 1).div_ceil(TAB_WIDTH) * TAB_WIDTH;

    let lines: Vec<String> = reports
        .iter()
        .map(|report| {
            let width = report.component.chars().count();
            let tabs = (column - width).div_ceil(TAB_WIDTH);
            format!("{}{}{}", report.component, "\t".repeat(tabs), report.status)
        })
        .collect();
    lines.join("\n")
}

fn render_table(reports: &[ComponentReport]) -> String {
    if reports.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record(["COMPONENT", "STATUS", "RESOURCES"]);
    for report in reports {
        builder.push_record([
            report.component.clone(),
            report.status.to_string(),
            report.resources.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}
