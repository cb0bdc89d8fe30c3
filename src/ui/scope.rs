//! Structured task scope owned by a presentation holder.
//!
//! Work launched through the scope is aborted when the scope is cancelled
//! or its owning [`HolderScope`] is dropped. Slot writes go through the
//! scope and are refused once cancellation has completed.

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;

use super::observable::{Observable, Stamp};
use crate::repository::StateStream;
use crate::RequestState;

struct ScopeInner {
    active: RwLock<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// Owning side: cancels everything on drop.
pub struct HolderScope {
    inner: Arc<ScopeInner>,
}

impl HolderScope {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                active: RwLock::new(true),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a handle for tasks running inside the scope.
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn is_active(&self) -> bool {
        *self.inner.active.read()
    }

    /// Stop accepting work, refuse further slot writes, abort running tasks.
    ///
    /// Once this returns no task of this scope can write a slot.
    pub fn cancel(&self) {
        {
            let mut active = self.inner.active.write();
            if !*active {
                return;
            }
            *active = false;
        }
        let tasks: Vec<_> = self.inner.tasks.lock().drain(..).collect();
        tracing::debug!(tasks = tasks.len(), "Cancelling holder scope");
        for task in tasks {
            task.abort();
        }
    }
}

impl Default for HolderScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HolderScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Lightweight handle for launching work and writing slots.
#[derive(Clone)]
pub struct ScopeHandle {
    inner: Arc<ScopeInner>,
}

impl ScopeHandle {
    pub fn is_active(&self) -> bool {
        *self.inner.active.read()
    }

    /// Spawn `task` on the runtime. Returns `false` if the scope is cancelled.
    pub fn launch<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let active = self.inner.active.read();
        if !*active {
            return false;
        }
        let handle = tokio::spawn(task);
        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);
        true
    }

    /// Stamped write, refused after cancellation.
    pub fn publish<T>(&self, slot: &Observable<T>, stamp: Stamp, value: T) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let active = self.inner.active.read();
        *active && slot.publish(stamp, value)
    }

    /// Unstamped write, refused after cancellation.
    pub fn set<T>(&self, slot: &Observable<T>, value: T) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let active = self.inner.active.read();
        if *active {
            slot.set(value);
        }
        *active
    }

    /// Copy every state of `states` into `slot`.
    ///
    /// The stamp is taken now, so a later call on the same slot supersedes
    /// this one even if this one finishes last.
    pub fn collect<T>(&self, states: StateStream<T>, slot: Observable<RequestState<T>>) -> bool
    where
        T: Clone + Send + Sync + 'static,
    {
        let stamp = slot.issue();
        let scope = self.clone();
        self.launch(async move {
            let mut states = states;
            while let Some(state) = states.next().await {
                if !scope.is_active() {
                    break;
                }
                scope.publish(&slot, stamp, state);
            }
        })
    }
}
