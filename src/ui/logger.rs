//! Cow logger holder.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use super::forms::{apply, check, FieldErrors, LoggerFormIntent, LoggerFormReducer, LoggerFormState};
use super::observable::Observable;
use super::scope::{HolderScope, ScopeHandle};
use super::status::{run_action, ActionStatus};
use crate::model::{ListResponse, Logger, UploadFile};
use crate::repository::{terminal, LoggerRepository};
use crate::RequestState;

pub struct LoggerHolder {
    inner: Arc<LoggerInner>,
    scope: HolderScope,
}

struct LoggerInner {
    repository: LoggerRepository,
    page_size: u32,
    entries: Observable<RequestState<ListResponse<Logger>>>,
    entry: Observable<RequestState<Logger>>,
    form: Observable<LoggerFormState>,
    status: ActionStatus,
}

impl LoggerInner {
    fn load_entries(&self, scope: &ScopeHandle, page: u32) {
        scope.collect(
            self.repository.entries(page, self.page_size),
            self.entries.clone(),
        );
    }
}

impl LoggerHolder {
    pub fn new(repository: LoggerRepository, page_size: u32) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                repository,
                page_size,
                entries: Observable::new(RequestState::Idle),
                entry: Observable::new(RequestState::Idle),
                form: Observable::new(LoggerFormState::default()),
                status: ActionStatus::new(),
            }),
            scope: HolderScope::new(),
        }
    }

    pub fn entries(&self) -> watch::Receiver<RequestState<ListResponse<Logger>>> {
        self.inner.entries.subscribe()
    }

    pub fn entries_state(&self) -> RequestState<ListResponse<Logger>> {
        self.inner.entries.get()
    }

    pub fn entry(&self) -> watch::Receiver<RequestState<Logger>> {
        self.inner.entry.subscribe()
    }

    pub fn form(&self) -> watch::Receiver<LoggerFormState> {
        self.inner.form.subscribe()
    }

    pub fn form_state(&self) -> LoggerFormState {
        self.inner.form.get()
    }

    pub fn status(&self) -> &ActionStatus {
        &self.inner.status
    }

    pub fn edit_form(&self, intent: LoggerFormIntent) {
        apply::<LoggerFormReducer>(&self.inner.form, intent);
    }

    pub fn load_entries(&self, page: u32) {
        self.inner.load_entries(&self.scope.handle(), page);
    }

    pub fn load_entry(&self, document_id: &str) {
        self.scope.handle().collect(
            self.inner.repository.entry(document_id.to_string()),
            self.inner.entry.clone(),
        );
    }

    /// Create an entry, uploading `image` first when given.
    ///
    /// A failed upload stops before the entry is created.
    pub fn create_entry(&self, image: Option<UploadFile>) -> Result<(), FieldErrors> {
        let input = check::<LoggerFormReducer, _>(
            &self.inner.form,
            LoggerFormState::validate,
            LoggerFormIntent::ShowErrors,
        )?;
        self.run_action(move |inner, scope| async move {
            let mut input = input;
            if let Some(file) = image {
                match terminal(inner.repository.upload(file)).await {
                    RequestState::Success(images) => match images.first() {
                        Some(image) => input.image = Some(image.id),
                        None => {
                            return RequestState::Error(
                                "Invalid response: upload returned no files".to_string(),
                            )
                        }
                    },
                    other => return other.map(|_| String::new()),
                }
            }

            let outcome = terminal(inner.repository.create(input)).await;
            if outcome.value().is_some() {
                scope.set(&inner.form, LoggerFormState::default());
                inner.load_entries(&scope, 1);
            }
            outcome.map(|entry| format!("Logged \"{}\"", entry.title))
        });
        Ok(())
    }

    pub fn delete_entry(&self, document_id: &str) {
        let document_id = document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.delete(document_id)).await;
            if outcome.value().is_some() {
                inner.load_entries(&scope, 1);
            }
            outcome.map(|_| "Entry deleted".to_string())
        });
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }

    fn run_action<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<LoggerInner>, ScopeHandle) -> Fut + Send + 'static,
        Fut: Future<Output = RequestState<String>> + Send + 'static,
    {
        run_action(
            self.scope.handle(),
            Arc::clone(&self.inner),
            self.inner.status.clone(),
            action,
        );
    }
}
