//! `extract` command: one extraction pass, records printed as JSON.

use std::path::Path;

use listmap_core::Selectors;

/// Extract records from `input` and print them as pretty JSON.
///
/// # Errors
///
/// Returns an error if the input file cannot be read. Malformed items do not
/// error; they degrade to default field values as extraction documents.
pub(crate) async fn run_extract(input: &Path, selectors: &Selectors) -> anyhow::Result<()> {
    let html = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;

    let records = listmap_engine::extract_records(&html, selectors);
    tracing::debug!(records = records.len(), "extraction pass complete");

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
