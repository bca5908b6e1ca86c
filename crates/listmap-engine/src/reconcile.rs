//! Marker reconciliation: diff the latest record sequence against the
//! rendered markers and apply the minimal create/move/remove set, then refit
//! the view.
//!
//! The reconciler is the sole owner of the marker index. Invariant held
//! after every [`Reconciler::apply`]: index keys equal the valid id set of
//! the latest records exactly — no stale handles, no duplicates.

use std::collections::{HashMap, HashSet};

use listmap_core::{Coordinate, LocationRecord};

use crate::widget::{Bounds, MapWidget, MarkerSpec};

pub struct Reconciler<W: MapWidget> {
    markers: HashMap<String, MarkerEntry<W::Marker>>,
}

struct MarkerEntry<M> {
    handle: M,
    position: Coordinate,
}

impl<W: MapWidget> Default for Reconciler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: MapWidget> Reconciler<W> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            markers: HashMap::new(),
        }
    }

    /// Number of markers currently on the map.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.markers.contains_key(id)
    }

    /// Current marker ids, sorted for deterministic inspection.
    #[must_use]
    pub fn marker_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.markers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Mutate widget state to match `records`.
    ///
    /// 1. Remove markers whose id left the valid id set (non-empty id plus
    ///    present coordinate).
    /// 2. In extraction order, move existing markers whose coordinate
    ///    changed and place markers for new ids. Operations are keyed by id
    ///    and idempotent per id; a later record with a duplicate id updates
    ///    the marker placed for the earlier one.
    /// 3. Refit the view over all current markers, unless none remain — an
    ///    empty pass leaves the view where it was.
    pub fn apply(&mut self, widget: &mut W, records: &[LocationRecord]) {
        let valid_ids: HashSet<&str> = records
            .iter()
            .filter(|r| r.is_markable())
            .map(|r| r.id.as_str())
            .collect();

        let stale: Vec<String> = self
            .markers
            .keys()
            .filter(|id| !valid_ids.contains(id.as_str()))
            .cloned()
            .collect();
        let removed = stale.len();
        for id in stale {
            if let Some(entry) = self.markers.remove(&id) {
                widget.remove_marker(entry.handle);
            }
        }

        let mut created = 0usize;
        let mut moved = 0usize;
        for record in records.iter().filter(|r| r.is_markable()) {
            let Some(position) = record.coordinate else {
                continue;
            };
            if let Some(entry) = self.markers.get_mut(&record.id) {
                if entry.position != position {
                    widget.move_marker(&mut entry.handle, position);
                    entry.position = position;
                    moved += 1;
                }
            } else {
                let spec = marker_spec(record, position);
                let handle = widget.place_marker(&spec);
                self.markers
                    .insert(record.id.clone(), MarkerEntry { handle, position });
                created += 1;
            }
        }

        if let Some(bounds) = Bounds::from_points(self.markers.values().map(|e| e.position)) {
            widget.fit_bounds(bounds);
        }

        tracing::debug!(
            created,
            moved,
            removed,
            total = self.markers.len(),
            "reconciled markers"
        );
    }
}

fn marker_spec(record: &LocationRecord, position: Coordinate) -> MarkerSpec {
    MarkerSpec {
        position,
        title: record.title.clone(),
        premium: record.is_premium,
        popup_html: popup_body(record),
    }
}

/// Detail popup body: title plus city/state/country, comma-joined with empty
/// segments omitted.
fn popup_body(record: &LocationRecord) -> String {
    let segments: Vec<String> = [
        &record.address.city,
        &record.address.state,
        &record.address.country,
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(|s| escape_html(s))
    .collect();

    let title = escape_html(&record.title);
    if segments.is_empty() {
        format!("<strong>{title}</strong>")
    } else {
        format!("<strong>{title}</strong><br>{}", segments.join(", "))
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
