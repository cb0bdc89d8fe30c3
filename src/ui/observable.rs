//! Observable state slots.
//!
//! A slot is a `watch` channel: holders write, views subscribe to a
//! read-only receiver. Writes can be stamped so that when two intents race
//! on one slot, only the most recently issued one may publish.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::RequestState;

/// Generation number handed out by [`Observable::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp(u64);

pub struct Observable<T> {
    inner: Arc<ObservableInner<T>>,
}

struct ObservableInner<T> {
    sender: watch::Sender<T>,
    issued: AtomicU64,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            inner: Arc::new(ObservableInner {
                sender,
                issued: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.sender.borrow().clone()
    }

    /// Read-only view that is notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.sender.subscribe()
    }

    /// Unconditional write.
    pub fn set(&self, value: T) {
        self.inner.sender.send_replace(value);
    }

    /// In-place edit through a closure.
    pub fn update(&self, edit: impl FnOnce(&mut T)) {
        self.inner.sender.send_modify(edit);
    }

    /// Start a new generation; earlier stamps become stale.
    pub fn issue(&self) -> Stamp {
        Stamp(self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, stamp: Stamp) -> bool {
        self.inner.issued.load(Ordering::SeqCst) == stamp.0
    }

    /// Write only if `stamp` is still the latest issued. Returns whether the
    /// value was written.
    pub fn publish(&self, stamp: Stamp, value: T) -> bool {
        let mut value = Some(value);
        self.inner.sender.send_if_modified(|current| {
            if self.inner.issued.load(Ordering::SeqCst) != stamp.0 {
                return false;
            }
            match value.take() {
                Some(next) => {
                    *current = next;
                    true
                }
                None => false,
            }
        })
    }
}

/// Wait until the slot behind `receiver` holds a terminal state.
///
/// A slot whose holder has gone away resolves to an error.
pub async fn settled<T>(receiver: &mut watch::Receiver<RequestState<T>>) -> RequestState<T>
where
    T: Clone,
{
    match receiver.wait_for(RequestState::is_terminal).await {
        Ok(state) => state.clone(),
        Err(_) => RequestState::Error("Screen closed before the request finished".to_string()),
    }
}
