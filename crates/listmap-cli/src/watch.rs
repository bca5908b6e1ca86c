//! `watch` command: poll an HTML file and keep the console map in sync.
//!
//! File polling stands in for the host page pushing snapshots: each changed
//! read lands in the `DocumentStore`, whose observer drives the debounced
//! reconciliation inside `MapApp`.

use std::convert::Infallible;
use std::path::Path;
use std::time::Duration;

use listmap_core::{AppConfig, Coordinate, Selectors};
use listmap_engine::{DocumentStore, MapApp};

use crate::console_map::ConsoleMap;

/// Run the sync loop until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the initial read of the input file fails. Later read
/// failures are logged and skipped — a transient write race should not kill
/// the loop.
pub(crate) async fn run_watch(
    input: &Path,
    selectors: Selectors,
    interval_ms: u64,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let initial = tokio::fs::read_to_string(input)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;

    let widget = ConsoleMap::new(
        Coordinate {
            lat: config.default_center_lat,
            lng: config.default_center_lng,
        },
        config.default_zoom,
    );

    let app = MapApp::start(
        DocumentStore::new(initial.clone()),
        selectors,
        Duration::from_millis(config.debounce_window_ms),
        async { Ok::<_, Infallible>(widget) },
    )
    .await;

    tracing::info!(
        input = %input.display(),
        interval_ms,
        markers = app.marker_count(),
        "watching for list changes"
    );

    let mut last_content = initial;
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match tokio::fs::read_to_string(input).await {
                    Ok(content) => {
                        if content != last_content {
                            last_content.clone_from(&content);
                            app.store().replace(content);
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to re-read input file"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!(
        "stopped; {} markers on the map at shutdown",
        app.marker_count()
    );
    Ok(())
}
