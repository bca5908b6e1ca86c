//! Integration tests for the full list-to-map pipeline: an HTML snapshot in
//! a `DocumentStore` drives `MapApp` through extraction, debounced change
//! observation, and marker reconciliation against a recording widget.
//!
//! Exercises only the public API; no markup internals.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use listmap_core::{Coordinate, Selectors};
use listmap_engine::{AppPhase, Bounds, DocumentStore, MapApp, MapWidget, MarkerSpec};

const WINDOW: Duration = Duration::from_millis(30);

/// Records every widget operation behind an `Arc` so the log survives the
/// widget moving into the app.
#[derive(Clone, Default)]
struct RecordingMap {
    log: Arc<Mutex<Vec<Event>>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Placed {
        title: String,
        premium: bool,
        popup_html: String,
        at: Coordinate,
    },
    Moved {
        title: String,
        to: Coordinate,
    },
    Removed {
        title: String,
    },
    Fitted(Bounds),
}

struct RecordingMarker {
    title: String,
}

impl MapWidget for RecordingMap {
    type Marker = RecordingMarker;

    fn place_marker(&mut self, spec: &MarkerSpec) -> RecordingMarker {
        self.log.lock().unwrap().push(Event::Placed {
            title: spec.title.clone(),
            premium: spec.premium,
            popup_html: spec.popup_html.clone(),
            at: spec.position,
        });
        RecordingMarker {
            title: spec.title.clone(),
        }
    }

    fn move_marker(&mut self, marker: &mut RecordingMarker, to: Coordinate) {
        self.log.lock().unwrap().push(Event::Moved {
            title: marker.title.clone(),
            to,
        });
    }

    fn remove_marker(&mut self, marker: RecordingMarker) {
        self.log.lock().unwrap().push(Event::Removed {
            title: marker.title,
        });
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.log.lock().unwrap().push(Event::Fitted(bounds));
    }
}

/// A realistic host page in the default selector dialect.
fn network_page(items: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <body>
    <header><nav class="site-nav">Stations</nav></header>
    <ul class="map-list" role="list">
      {items}
    </ul>
    <footer>© Example Fuels</footer>
  </body>
</html>"#
    )
}

const PIER_NINE: &str = r#"
  <li class="map-list-item">
    <h3 class="location-title">Pier Nine</h3>
    <img class="location-image" src="https://cdn.example.com/pier9.jpg">
    <span data-map-field="latlong">40.7128, -74.0060</span>
    <span data-map-field="id">pier-9</span>
    <span data-map-field="premium">true</span>
    <span data-map-field="country">USA</span>
    <span data-map-field="state">NY</span>
    <span data-map-field="city">New York</span>
  </li>"#;

const DEPOT: &str = r#"
  <li class="map-list-item">
    <h3 class="location-title">Harbor Depot</h3>
    <span data-map-field="latlong">34.0522,-118.2437</span>
    <span data-map-field="id">depot</span>
  </li>"#;

/// Unparsable coordinate; extracted but never rendered.
const BROKEN: &str = r#"
  <li class="map-list-item">
    <h3 class="location-title">Unlisted Yard</h3>
    <span data-map-field="latlong">tbd</span>
    <span data-map-field="id">yard</span>
  </li>"#;

async fn settle() {
    tokio::time::sleep(WINDOW * 4).await;
}

async fn start_app(store: &DocumentStore, widget: RecordingMap) -> MapApp<RecordingMap> {
    MapApp::start(store.clone(), Selectors::default(), WINDOW, async {
        Ok::<_, String>(widget)
    })
    .await
}

#[tokio::test]
async fn initial_load_renders_markable_records_and_fits_the_view() {
    let store = DocumentStore::new(network_page(&format!("{PIER_NINE}{DEPOT}{BROKEN}")));
    let widget = RecordingMap::default();
    let log = Arc::clone(&widget.log);

    let app = start_app(&store, widget).await;

    assert_eq!(app.phase(), AppPhase::MapReady);
    assert_eq!(app.records().len(), 3);
    assert_eq!(app.marker_ids(), ["depot", "pier-9"]);

    let events = log.lock().unwrap().clone();
    let placed: Vec<&Event> = events
        .iter()
        .filter(|e| matches!(e, Event::Placed { .. }))
        .collect();
    assert_eq!(placed.len(), 2);

    // Extraction order is preserved in placement order.
    let Event::Placed {
        title,
        premium,
        popup_html,
        at,
    } = placed[0]
    else {
        unreachable!()
    };
    assert_eq!(title, "Pier Nine");
    assert!(*premium);
    assert_eq!(popup_html, "<strong>Pier Nine</strong><br>New York, NY, USA");
    assert!((at.lat - 40.7128).abs() < f64::EPSILON);

    // The view covers both rendered markers.
    let Some(Event::Fitted(bounds)) = events.last() else {
        panic!("expected a bounds fit after the initial pass");
    };
    assert!(bounds.contains(Coordinate {
        lat: 40.7128,
        lng: -74.0060
    }));
    assert!(bounds.contains(Coordinate {
        lat: 34.0522,
        lng: -118.2437
    }));
}

#[tokio::test]
async fn list_edits_flow_through_debounce_to_minimal_marker_operations() {
    let store = DocumentStore::new(network_page(&format!("{PIER_NINE}{DEPOT}")));
    let widget = RecordingMap::default();
    let log = Arc::clone(&widget.log);

    let app = start_app(&store, widget).await;
    assert_eq!(app.marker_ids(), ["depot", "pier-9"]);
    log.lock().unwrap().clear();

    // A burst of filter changes: depot dropped, then pier-9 nudged.
    store.replace(network_page(PIER_NINE));
    store.replace(network_page(&PIER_NINE.replace("40.7128, -74.0060", "40.75, -74.0")));
    settle().await;

    assert_eq!(app.marker_ids(), ["pier-9"]);
    let events = log.lock().unwrap().clone();
    assert!(events.contains(&Event::Removed {
        title: "Harbor Depot".to_string()
    }));
    assert!(events.contains(&Event::Moved {
        title: "Pier Nine".to_string(),
        to: Coordinate {
            lat: 40.75,
            lng: -74.0
        },
    }));
    // The burst collapsed into one pass: exactly one fit, no new placements.
    let fits = events
        .iter()
        .filter(|e| matches!(e, Event::Fitted(_)))
        .count();
    assert_eq!(fits, 1);
    assert!(!events.iter().any(|e| matches!(e, Event::Placed { .. })));
}

#[tokio::test]
async fn emptied_list_removes_all_markers_but_keeps_the_view() {
    let store = DocumentStore::new(network_page(DEPOT));
    let widget = RecordingMap::default();
    let log = Arc::clone(&widget.log);

    let app = start_app(&store, widget).await;
    assert_eq!(app.marker_count(), 1);
    log.lock().unwrap().clear();

    store.replace(network_page(""));
    settle().await;

    assert_eq!(app.marker_count(), 0);
    assert!(app.records().is_empty());
    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![Event::Removed {
            title: "Harbor Depot".to_string()
        }]
    );
}

#[tokio::test]
async fn edits_outside_the_list_do_not_trigger_a_pass() {
    let store = DocumentStore::new(network_page(DEPOT));
    let widget = RecordingMap::default();
    let log = Arc::clone(&widget.log);

    let app = start_app(&store, widget).await;
    log.lock().unwrap().clear();

    store.replace(network_page(DEPOT).replace("© Example Fuels", "© Example Fuels 2026"));
    settle().await;

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(app.marker_count(), 1);
}

#[tokio::test]
async fn widget_load_failure_leaves_a_permanently_loading_instance() {
    let store = DocumentStore::new(network_page(DEPOT));

    let app = MapApp::<RecordingMap>::start(
        store.clone(),
        Selectors::default(),
        WINDOW,
        async { Err::<RecordingMap, _>("provider script unreachable") },
    )
    .await;

    assert_eq!(app.phase(), AppPhase::MapLoading);
    assert_eq!(app.marker_count(), 0);
    assert!(app.records().is_empty());

    store.replace(network_page(&format!("{DEPOT}{PIER_NINE}")));
    settle().await;
    assert_eq!(app.phase(), AppPhase::MapLoading);
    assert_eq!(app.marker_count(), 0);
}
