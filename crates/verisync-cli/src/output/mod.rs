use verisync_core::responses::ReconciliationSummary;

use crate::cli::OutputFormat;

pub mod table;

/// Render a summary in the requested format.
pub fn render(summary: &ReconciliationSummary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Raw => Ok(serde_json::to_string(summary)?),
        OutputFormat::Table => Ok(render_summary_table(summary)),
    }
}

/// Print a summary in the requested format.
pub fn output(summary: &ReconciliationSummary, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(summary, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_summary_table(summary: &ReconciliationSummary) -> String {
    let totals = format!(
        "{} pass: {} checked, {} failed, {} skipped, {} mismatched, {} notified",
        summary.mode,
        summary.checked,
        summary.failed,
        summary.skipped,
        summary.mismatches(),
        summary.notifications
    );
    if summary.results.is_empty() {
        return format!("{totals}\n(no records checked)");
    }

    let rows = summary
        .results
        .iter()
        .map(|outcome| {
            vec![
                outcome.id.clone(),
                outcome.mismatch.to_string(),
                outcome
                    .new_valid_until
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
                outcome.notified.to_string(),
                outcome.reference_url.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect::<Vec<_>>();

    let table = table::render_table(
        &["id", "mismatch", "valid_until", "notified", "reference_url"],
        &rows,
    );
    format!("{totals}\n\n{table}")
}
