//! Shared markup snapshot with structural-change subscriptions.
//!
//! Replaces DOM mutation observation with an explicit interface: the host
//! pushes new snapshots through [`DocumentStore::replace`], and watchers
//! registered with [`DocumentStore::observe`] fire only when the watched
//! container's contents actually changed. Edits outside the container
//! (including attribute-only churn elsewhere in the page) never fire.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, Weak};

use crate::markup;

#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    html: String,
    next_token: u64,
    watchers: Vec<Watcher>,
}

struct Watcher {
    token: u64,
    container_class: String,
    /// Hash of the container's inner HTML at the last notification point.
    /// `None` means the container was absent.
    signature: Option<u64>,
    notify: Arc<dyn Fn() + Send + Sync>,
}

/// Keeps a watcher alive; dropping it detaches the watcher.
pub struct Subscription {
    token: u64,
    store: Weak<Mutex<StoreInner>>,
}

impl DocumentStore {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                html: html.into(),
                next_token: 0,
                watchers: Vec::new(),
            })),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn html(&self) -> String {
        self.inner.lock().expect("document lock").html.clone()
    }

    /// Swap in a new snapshot and notify watchers whose container changed.
    pub fn replace(&self, html: impl Into<String>) {
        let html = html.into();
        let mut to_notify: Vec<Arc<dyn Fn() + Send + Sync>> = Vec::new();
        {
            let mut guard = self.inner.lock().expect("document lock");
            guard.html = html;
            let StoreInner { html, watchers, .. } = &mut *guard;
            for watcher in watchers.iter_mut() {
                let signature = container_signature(html, &watcher.container_class);
                if signature != watcher.signature {
                    watcher.signature = signature;
                    to_notify.push(Arc::clone(&watcher.notify));
                }
            }
        }
        // Callbacks run outside the lock so they may touch the store.
        for notify in to_notify {
            notify();
        }
    }

    /// Watch the container with the given class for structural changes.
    ///
    /// Returns `None` when no such container exists in the current snapshot;
    /// this is the documented degraded state (a warning is logged, updates
    /// simply stop flowing), not an error.
    #[must_use]
    pub fn observe<F>(&self, container_class: &str, on_change: F) -> Option<Subscription>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("document lock");
        let Some(signature) = container_signature(&inner.html, container_class) else {
            tracing::warn!(
                container_class,
                "list container not found; changes will not be observed"
            );
            return None;
        };

        inner.next_token += 1;
        let token = inner.next_token;
        inner.watchers.push(Watcher {
            token,
            container_class: container_class.to_string(),
            signature: Some(signature),
            notify: Arc::new(on_change),
        });

        Some(Subscription {
            token,
            store: Arc::downgrade(&self.inner),
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            let mut inner = store.lock().expect("document lock");
            inner.watchers.retain(|w| w.token != self.token);
        }
    }
}

/// Hash of the container's inner HTML, or `None` when the container is
/// absent. Container removal therefore counts as a structural change.
fn container_signature(html: &str, container_class: &str) -> Option<u64> {
    let container = markup::first_with_class(html, container_class)?;
    let mut hasher = DefaultHasher::new();
    container.inner.hash(&mut hasher);
    Some(hasher.finish())
}
