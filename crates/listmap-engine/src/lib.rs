pub mod app;
pub mod debounce;
pub mod document;
pub mod extract;
mod markup;
pub mod reconcile;
pub mod widget;

pub use app::{AppPhase, MapApp};
pub use debounce::Debouncer;
pub use document::{DocumentStore, Subscription};
pub use extract::extract_records;
pub use reconcile::Reconciler;
pub use widget::{Bounds, MapWidget, MarkerSpec};
