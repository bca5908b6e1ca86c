//! A `MapWidget` that renders to the log instead of a real map surface.
//!
//! Stands in for the external mapping provider: every marker operation and
//! view fit becomes a structured `tracing` event, so `sync` and `watch`
//! output a readable stream of what a real widget would be told to do.

use listmap_core::Coordinate;
use listmap_engine::{Bounds, MapWidget, MarkerSpec};

pub(crate) struct ConsoleMap {
    next_id: u64,
    live_markers: usize,
}

pub(crate) struct ConsoleMarker {
    id: u64,
    title: String,
}

impl ConsoleMap {
    pub(crate) fn new(center: Coordinate, zoom: u8) -> Self {
        tracing::info!(lat = center.lat, lng = center.lng, zoom, "console map initialized");
        Self {
            next_id: 0,
            live_markers: 0,
        }
    }
}

impl MapWidget for ConsoleMap {
    type Marker = ConsoleMarker;

    fn place_marker(&mut self, spec: &MarkerSpec) -> ConsoleMarker {
        self.next_id += 1;
        self.live_markers += 1;
        tracing::info!(
            marker = self.next_id,
            title = %spec.title,
            lat = spec.position.lat,
            lng = spec.position.lng,
            premium = spec.premium,
            "marker placed"
        );
        ConsoleMarker {
            id: self.next_id,
            title: spec.title.clone(),
        }
    }

    fn move_marker(&mut self, marker: &mut ConsoleMarker, to: Coordinate) {
        tracing::info!(
            marker = marker.id,
            title = %marker.title,
            lat = to.lat,
            lng = to.lng,
            "marker moved"
        );
    }

    fn remove_marker(&mut self, marker: ConsoleMarker) {
        self.live_markers -= 1;
        tracing::info!(marker = marker.id, title = %marker.title, "marker removed");
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        tracing::info!(
            south = bounds.south,
            west = bounds.west,
            north = bounds.north,
            east = bounds.east,
            markers = self.live_markers,
            "view fitted to markers"
        );
    }
}
