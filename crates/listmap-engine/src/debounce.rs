//! Trailing-edge debouncer.
//!
//! Collapses a burst of triggers into one action call after the burst has
//! been quiet for the full window. The action receives the value of the
//! last trigger in the burst.

use std::time::Duration;

use tokio::sync::mpsc;

/// Cloneable trigger handle for a debounced action.
///
/// Each [`trigger`](Debouncer::trigger) resets the quiescent window and
/// replaces the value that will be delivered. A pending action still fires
/// if every handle is dropped before the window elapses, matching plain
/// timer semantics.
#[derive(Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the timer task on the current tokio runtime.
    pub fn new<F>(window: Duration, mut action: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(first) = rx.recv().await {
                let mut latest = first;
                loop {
                    match tokio::time::timeout(window, rx.recv()).await {
                        // Another trigger inside the window: keep waiting.
                        Ok(Some(next)) => latest = next,
                        // All handles dropped with a trigger pending:
                        // deliver it, then stop.
                        Ok(None) => {
                            action(latest);
                            return;
                        }
                        // Quiet for a full window.
                        Err(_) => {
                            action(latest);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx }
    }

    /// Schedule (or re-schedule) the action with `value`.
    pub fn trigger(&self, value: T) {
        // Send only fails when the task is gone, which means the runtime is
        // shutting down; dropping the trigger is the right behavior then.
        let _ = self.tx.send(value);
    }
}
