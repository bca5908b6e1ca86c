//! The map widget capability.
//!
//! Marker create/move/remove and view fitting are the only operations the
//! sync pipeline needs from a map provider. Calls are infallible: a loaded
//! widget is not expected to fail in normal operation, and load failure
//! itself is handled in [`crate::app`].

use listmap_core::Coordinate;

/// Everything a widget needs to render one marker. The popup content rides
/// along, so removing the marker removes its popup with it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub title: String,
    /// Premium locations get a distinct visual treatment (icon choice is the
    /// widget's concern).
    pub premium: bool,
    /// HTML body of the click-triggered detail popup.
    pub popup_html: String,
}

/// A rendered map surface owning markers and a viewport.
pub trait MapWidget {
    /// Opaque handle to one rendered marker.
    type Marker;

    fn place_marker(&mut self, spec: &MarkerSpec) -> Self::Marker;
    fn move_marker(&mut self, marker: &mut Self::Marker, to: Coordinate);
    fn remove_marker(&mut self, marker: Self::Marker);
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// A lat/lng bounding box, south-west to north-east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// The degenerate box containing a single point.
    #[must_use]
    pub fn around(point: Coordinate) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    /// Grow the box to contain `point`.
    pub fn extend(&mut self, point: Coordinate) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    /// The smallest box containing every point, or `None` for an empty
    /// iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::around(iter.next()?);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}
