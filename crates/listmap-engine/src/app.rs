//! Application lifecycle: widget load, initial sync, change observation.
//!
//! One `MapApp` instance owns the widget, the marker index, and the last
//! extracted records, and lives until dropped. There is no teardown
//! transition; dropping the instance detaches its observer.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use listmap_core::{LocationRecord, Selectors};

use crate::debounce::Debouncer;
use crate::document::{DocumentStore, Subscription};
use crate::extract::extract_records;
use crate::reconcile::Reconciler;
use crate::widget::MapWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Constructed, widget load not yet begun.
    Uninitialized,
    /// Waiting on the widget load. Load failure is terminal: the instance
    /// stays here forever and performs no further work.
    MapLoading,
    /// Widget loaded; observing and reconciling.
    MapReady,
}

pub struct MapApp<W: MapWidget> {
    shared: Arc<Mutex<AppShared<W>>>,
    store: DocumentStore,
    // Held for their lifetimes: dropping the app detaches the observer and
    // lets the debouncer task wind down.
    _subscription: Option<Subscription>,
    _debouncer: Option<Debouncer<()>>,
}

struct AppShared<W: MapWidget> {
    phase: AppPhase,
    widget: Option<W>,
    reconciler: Reconciler<W>,
    records: Vec<LocationRecord>,
    selectors: Selectors,
}

impl<W> MapApp<W>
where
    W: MapWidget + Send + 'static,
    W::Marker: Send + 'static,
{
    /// Await the widget load, run the initial extraction + reconciliation,
    /// and install the change observer routed through a debouncer.
    ///
    /// Load failure does not propagate: it is reported through
    /// `tracing::error!` and the returned instance stays in
    /// [`AppPhase::MapLoading`] with no observer installed. A missing list
    /// container is likewise degraded, not an error — the initial pass
    /// stands and no further updates flow.
    pub async fn start<Fut, E>(
        store: DocumentStore,
        selectors: Selectors,
        debounce_window: Duration,
        load: Fut,
    ) -> Self
    where
        Fut: Future<Output = Result<W, E>>,
        E: std::fmt::Display,
    {
        let shared = Arc::new(Mutex::new(AppShared {
            phase: AppPhase::Uninitialized,
            widget: None,
            reconciler: Reconciler::new(),
            records: Vec::new(),
            selectors,
        }));

        shared.lock().expect("app lock").phase = AppPhase::MapLoading;
        let widget = match load.await {
            Ok(widget) => widget,
            Err(e) => {
                tracing::error!(error = %e, "map widget failed to load; marker sync disabled");
                return Self {
                    shared,
                    store,
                    _subscription: None,
                    _debouncer: None,
                };
            }
        };

        let container_class = {
            let mut inner = shared.lock().expect("app lock");
            inner.widget = Some(widget);
            inner.phase = AppPhase::MapReady;
            inner.selectors.container_class.clone()
        };

        refresh(&shared, &store);

        let debouncer = {
            let shared = Arc::clone(&shared);
            let store = store.clone();
            Debouncer::new(debounce_window, move |()| refresh(&shared, &store))
        };
        let subscription = {
            let debouncer = debouncer.clone();
            store.observe(&container_class, move || debouncer.trigger(()))
        };

        Self {
            shared,
            store,
            _subscription: subscription,
            _debouncer: Some(debouncer),
        }
    }

    #[must_use]
    pub fn phase(&self) -> AppPhase {
        self.shared.lock().expect("app lock").phase
    }

    /// The last extracted record sequence, including records that were not
    /// markable.
    #[must_use]
    pub fn records(&self) -> Vec<LocationRecord> {
        self.shared.lock().expect("app lock").records.clone()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.shared.lock().expect("app lock").reconciler.marker_count()
    }

    #[must_use]
    pub fn marker_ids(&self) -> Vec<String> {
        self.shared.lock().expect("app lock").reconciler.marker_ids()
    }

    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

/// One extraction + reconciliation pass over the current snapshot.
fn refresh<W: MapWidget>(shared: &Mutex<AppShared<W>>, store: &DocumentStore) {
    let html = store.html();
    let mut inner = shared.lock().expect("app lock");
    if inner.phase != AppPhase::MapReady {
        return;
    }

    let AppShared {
        widget,
        reconciler,
        records,
        selectors,
        ..
    } = &mut *inner;

    let latest = extract_records(&html, selectors);
    if let Some(widget) = widget.as_mut() {
        reconciler.apply(widget, &latest);
    }
    *records = latest;
}
