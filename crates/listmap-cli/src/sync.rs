//! `sync` command: one reconciliation pass against the console map.

use std::path::Path;

use listmap_core::{AppConfig, Coordinate, Selectors};
use listmap_engine::Reconciler;

use crate::console_map::ConsoleMap;

/// Extract records from `input`, reconcile them onto a fresh console map,
/// and print a summary of the resulting marker set.
///
/// # Errors
///
/// Returns an error if the input file cannot be read.
pub(crate) async fn run_sync(
    input: &Path,
    selectors: &Selectors,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let html = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;

    let mut widget = ConsoleMap::new(
        Coordinate {
            lat: config.default_center_lat,
            lng: config.default_center_lng,
        },
        config.default_zoom,
    );
    let mut reconciler = Reconciler::new();

    let records = listmap_engine::extract_records(&html, selectors);
    reconciler.apply(&mut widget, &records);

    println!(
        "{} records extracted, {} markers on the map",
        records.len(),
        reconciler.marker_count()
    );
    for id in reconciler.marker_ids() {
        println!("  {id}");
    }
    Ok(())
}
