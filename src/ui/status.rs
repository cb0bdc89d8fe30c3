//! Busy flag and user notifications for mutation intents.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::observable::{Observable, Stamp};
use super::scope::ScopeHandle;
use crate::RequestState;

/// Progress of create/update/delete intents on one holder.
///
/// `outcome` keeps the last result (the error slot on failure); `message`
/// is a one-shot notification cleared by [`ActionStatus::take_message`].
/// When actions overlap, `busy` stays set until the newest one finishes.
#[derive(Clone)]
pub struct ActionStatus {
    busy: Observable<bool>,
    outcome: Observable<RequestState<String>>,
    message: Observable<Option<String>>,
    /// Serializes `begin`/`finish` so the stamp check and the busy write agree.
    gate: Arc<Mutex<()>>,
}

impl ActionStatus {
    pub fn new() -> Self {
        Self {
            busy: Observable::new(false),
            outcome: Observable::new(RequestState::Idle),
            message: Observable::new(None),
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn outcome(&self) -> watch::Receiver<RequestState<String>> {
        self.outcome.subscribe()
    }

    pub fn current_outcome(&self) -> RequestState<String> {
        self.outcome.get()
    }

    pub fn messages(&self) -> watch::Receiver<Option<String>> {
        self.message.subscribe()
    }

    /// Return the pending notification and clear it.
    pub fn take_message(&self) -> Option<String> {
        let mut taken = None;
        self.message.update(|message| taken = message.take());
        taken
    }

    /// Mark a mutation as started.
    pub(crate) fn begin(&self, scope: &ScopeHandle) -> Stamp {
        let _gate = self.gate.lock();
        let stamp = self.outcome.issue();
        scope.set(&self.busy, true);
        scope.publish(&self.outcome, stamp, RequestState::Loading);
        stamp
    }

    /// Record the terminal outcome and raise a notification.
    pub(crate) fn finish(&self, scope: &ScopeHandle, stamp: Stamp, outcome: RequestState<String>) {
        match &outcome {
            RequestState::Success(message) => tracing::info!(%message, "Action completed"),
            RequestState::Error(message) => tracing::warn!(%message, "Action failed"),
            RequestState::Idle | RequestState::Loading => {}
        }
        let message = match &outcome {
            RequestState::Success(message) | RequestState::Error(message) => Some(message.clone()),
            RequestState::Idle | RequestState::Loading => None,
        };
        let _gate = self.gate.lock();
        // A superseded action leaves the flag to the one that replaced it.
        if scope.publish(&self.outcome, stamp, outcome) {
            scope.set(&self.message, message);
            scope.set(&self.busy, false);
        }
    }
}

/// Launch a mutation: mark `status` busy, run `action` in the scope and
/// record whatever outcome it returns.
pub(crate) fn run_action<S, F, Fut>(scope: ScopeHandle, state: Arc<S>, status: ActionStatus, action: F)
where
    S: Send + Sync + 'static,
    F: FnOnce(Arc<S>, ScopeHandle) -> Fut + Send + 'static,
    Fut: Future<Output = RequestState<String>> + Send + 'static,
{
    let stamp = status.begin(&scope);
    let task_scope = scope.clone();
    scope.launch(async move {
        let outcome = action(state, task_scope.clone()).await;
        status.finish(&task_scope, stamp, outcome);
    });
}

impl Default for ActionStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::scope::HolderScope;

    #[tokio::test]
    async fn message_is_one_shot() {
        let scope = HolderScope::new();
        let status = ActionStatus::new();
        let stamp = status.begin(&scope.handle());
        assert!(status.is_busy());
        assert!(status.current_outcome().is_loading());

        status.finish(&scope.handle(), stamp, RequestState::Success("Saved".to_string()));
        assert!(!status.is_busy());
        assert_eq!(status.take_message().as_deref(), Some("Saved"));
        assert_eq!(status.take_message(), None);
        assert_eq!(status.current_outcome(), RequestState::Success("Saved".to_string()));
    }

    #[tokio::test]
    async fn superseded_action_keeps_busy() {
        let scope = HolderScope::new();
        let status = ActionStatus::new();
        let first = status.begin(&scope.handle());
        let second = status.begin(&scope.handle());

        status.finish(&scope.handle(), first, RequestState::Success("First".to_string()));
        assert!(status.is_busy());
        assert!(status.current_outcome().is_loading());
        assert_eq!(status.take_message(), None);

        status.finish(&scope.handle(), second, RequestState::Success("Second".to_string()));
        assert!(!status.is_busy());
        assert_eq!(status.take_message().as_deref(), Some("Second"));
    }
}
