//! Adverts screens holder: listing, detail, categories and the advert form.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::chain::create_then_link;
use super::forms::{apply, check, AdvertFormIntent, AdvertFormReducer, AdvertFormState, FieldErrors};
use super::observable::Observable;
use super::scope::{HolderScope, ScopeHandle};
use super::status::{run_action, ActionStatus};
use crate::api::AdvertQuery;
use crate::model::{Advert, Category, ListResponse, ProfileRelation};
use crate::repository::{terminal, AdvertRepository, ProfileRepository};
use crate::RequestState;

pub struct AdvertsHolder {
    inner: Arc<AdvertsInner>,
    scope: HolderScope,
}

struct AdvertsInner {
    adverts_repository: AdvertRepository,
    profile_repository: ProfileRepository,
    adverts: Observable<RequestState<ListResponse<Advert>>>,
    categories: Observable<RequestState<ListResponse<Category>>>,
    advert: Observable<RequestState<Advert>>,
    form: Observable<AdvertFormState>,
    status: ActionStatus,
    /// Query of the last listing, reused by reloads.
    last_query: Mutex<AdvertQuery>,
}

impl AdvertsInner {
    fn load_adverts(&self, scope: &ScopeHandle, query: AdvertQuery) {
        *self.last_query.lock() = query.clone();
        scope.collect(self.adverts_repository.adverts(query), self.adverts.clone());
    }

    fn reload_adverts(&self, scope: &ScopeHandle) {
        let query = self.last_query.lock().clone();
        self.load_adverts(scope, query);
    }
}

impl AdvertsHolder {
    pub fn new(
        adverts_repository: AdvertRepository,
        profile_repository: ProfileRepository,
        page_size: u32,
    ) -> Self {
        Self {
            inner: Arc::new(AdvertsInner {
                adverts_repository,
                profile_repository,
                adverts: Observable::new(RequestState::Idle),
                categories: Observable::new(RequestState::Idle),
                advert: Observable::new(RequestState::Idle),
                form: Observable::new(AdvertFormState::default()),
                status: ActionStatus::new(),
                last_query: Mutex::new(AdvertQuery::first_page(page_size)),
            }),
            scope: HolderScope::new(),
        }
    }

    pub fn adverts(&self) -> watch::Receiver<RequestState<ListResponse<Advert>>> {
        self.inner.adverts.subscribe()
    }

    pub fn adverts_state(&self) -> RequestState<ListResponse<Advert>> {
        self.inner.adverts.get()
    }

    pub fn categories(&self) -> watch::Receiver<RequestState<ListResponse<Category>>> {
        self.inner.categories.subscribe()
    }

    pub fn advert(&self) -> watch::Receiver<RequestState<Advert>> {
        self.inner.advert.subscribe()
    }

    pub fn form(&self) -> watch::Receiver<AdvertFormState> {
        self.inner.form.subscribe()
    }

    pub fn form_state(&self) -> AdvertFormState {
        self.inner.form.get()
    }

    pub fn status(&self) -> &ActionStatus {
        &self.inner.status
    }

    /// Query used by the most recent listing.
    pub fn current_query(&self) -> AdvertQuery {
        self.inner.last_query.lock().clone()
    }

    pub fn edit_form(&self, intent: AdvertFormIntent) {
        apply::<AdvertFormReducer>(&self.inner.form, intent);
    }

    pub fn load_adverts(&self, query: AdvertQuery) {
        self.inner.load_adverts(&self.scope.handle(), query);
    }

    /// Repeat the last listing.
    pub fn reload_adverts(&self) {
        self.inner.reload_adverts(&self.scope.handle());
    }

    pub fn load_categories(&self) {
        self.scope.handle().collect(
            self.inner.adverts_repository.categories(),
            self.inner.categories.clone(),
        );
    }

    pub fn load_advert(&self, document_id: &str) {
        self.scope.handle().collect(
            self.inner.adverts_repository.advert(document_id.to_string()),
            self.inner.advert.clone(),
        );
    }

    /// Create an advert from the form and attach it to the seller's profile.
    pub fn create_advert(&self, profile_document_id: &str) -> Result<(), FieldErrors> {
        let input = self.validated_form()?;
        let profile_id = profile_document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let profiles = inner.profile_repository.clone();
            let outcome = create_then_link(inner.adverts_repository.create(input), |advert: &Advert| {
                profiles.link(profile_id, ProfileRelation::Adverts, advert.document_id.clone())
            })
            .await;

            if outcome.created() {
                scope.set(&inner.form, AdvertFormState::default());
                inner.reload_adverts(&scope);
            }
            outcome.into_state("Advert")
        });
        Ok(())
    }

    pub fn update_advert(&self, document_id: &str) -> Result<(), FieldErrors> {
        let input = self.validated_form()?;
        let document_id = document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.adverts_repository.update(document_id, input)).await;
            if let Some(advert) = outcome.value() {
                let stamp = inner.advert.issue();
                scope.publish(&inner.advert, stamp, RequestState::Success(advert.clone()));
                inner.reload_adverts(&scope);
            }
            outcome.map(|advert| format!("Advert \"{}\" updated", advert.title))
        });
        Ok(())
    }

    pub fn delete_advert(&self, document_id: &str) {
        let document_id = document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.adverts_repository.delete(document_id)).await;
            if outcome.value().is_some() {
                inner.reload_adverts(&scope);
            }
            outcome.map(|_| "Advert deleted".to_string())
        });
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }

    fn validated_form(&self) -> Result<crate::model::AdvertInput, FieldErrors> {
        check::<AdvertFormReducer, _>(
            &self.inner.form,
            AdvertFormState::validate,
            AdvertFormIntent::ShowErrors,
        )
    }

    fn run_action<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<AdvertsInner>, ScopeHandle) -> Fut + Send + 'static,
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
