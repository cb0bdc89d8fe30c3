//! Profile screen holder: the profile, its addresses and their forms.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use super::chain::create_then_link;
use super::forms::{
    apply, check, AddressFormIntent, AddressFormReducer, AddressFormState, FieldErrors,
    ProfileFormIntent, ProfileFormReducer, ProfileFormState,
};
use super::observable::Observable;
use super::scope::{HolderScope, ScopeHandle};
use super::status::{run_action, ActionStatus};
use crate::model::{Address, Profile, ProfileRelation};
use crate::repository::{terminal, ProfileRepository};
use crate::RequestState;

pub struct ProfileHolder {
    inner: Arc<ProfileInner>,
    scope: HolderScope,
}

struct ProfileInner {
    repository: ProfileRepository,
    profile: Observable<RequestState<Profile>>,
    profile_form: Observable<ProfileFormState>,
    address_form: Observable<AddressFormState>,
    status: ActionStatus,
}

impl ProfileInner {
    fn load_profile(&self, scope: &ScopeHandle, document_id: &str) {
        scope.collect(
            self.repository.profile(document_id.to_string()),
            self.profile.clone(),
        );
    }
}

impl ProfileHolder {
    pub fn new(repository: ProfileRepository) -> Self {
        Self {
            inner: Arc::new(ProfileInner {
                repository,
                profile: Observable::new(RequestState::Idle),
                profile_form: Observable::new(ProfileFormState::default()),
                address_form: Observable::new(AddressFormState::default()),
                status: ActionStatus::new(),
            }),
            scope: HolderScope::new(),
        }
    }

    pub fn profile(&self) -> watch::Receiver<RequestState<Profile>> {
        self.inner.profile.subscribe()
    }

    pub fn profile_state(&self) -> RequestState<Profile> {
        self.inner.profile.get()
    }

    pub fn profile_form(&self) -> watch::Receiver<ProfileFormState> {
        self.inner.profile_form.subscribe()
    }

    pub fn address_form(&self) -> watch::Receiver<AddressFormState> {
        self.inner.address_form.subscribe()
    }

    pub fn address_form_state(&self) -> AddressFormState {
        self.inner.address_form.get()
    }

    pub fn status(&self) -> &ActionStatus {
        &self.inner.status
    }

    pub fn edit_profile(&self, intent: ProfileFormIntent) {
        apply::<ProfileFormReducer>(&self.inner.profile_form, intent);
    }

    pub fn edit_address(&self, intent: AddressFormIntent) {
        apply::<AddressFormReducer>(&self.inner.address_form, intent);
    }

    /// Prefill the address form for editing an existing address.
    pub fn edit_existing_address(&self, address: Address) {
        self.edit_address(AddressFormIntent::Load(address));
    }

    pub fn load_profile(&self, document_id: &str) {
        self.inner.load_profile(&self.scope.handle(), document_id);
    }

    pub fn update_profile(&self, document_id: &str) -> Result<(), FieldErrors> {
        let input = check::<ProfileFormReducer, _>(
            &self.inner.profile_form,
            ProfileFormState::validate,
            ProfileFormIntent::ShowErrors,
        )?;
        let document_id = document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.update(document_id.clone(), input)).await;
            if outcome.value().is_some() {
                inner.load_profile(&scope, &document_id);
            }
            outcome.map(|_| "Profile updated".to_string())
        });
        Ok(())
    }

    /// Create an address from the form, then link it to the profile.
    pub fn create_address(&self, profile_document_id: &str) -> Result<(), FieldErrors> {
        let input = check::<AddressFormReducer, _>(
            &self.inner.address_form,
            AddressFormState::validate,
            AddressFormIntent::ShowErrors,
        )?;
        let profile_id = profile_document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let repository = inner.repository.clone();
            let link_target = profile_id.clone();
            let outcome = create_then_link(repository.create_address(input), |address: &Address| {
                repository.link(
                    link_target,
                    ProfileRelation::Addresses,
                    address.document_id.clone(),
                )
            })
            .await;

            if outcome.created() {
                scope.set(&inner.address_form, AddressFormState::default());
                inner.load_profile(&scope, &profile_id);
            }
            outcome.into_state("Address")
        });
        Ok(())
    }

    pub fn update_address(
        &self,
        profile_document_id: &str,
        address_document_id: &str,
    ) -> Result<(), FieldErrors> {
        let input = check::<AddressFormReducer, _>(
            &self.inner.address_form,
            AddressFormState::validate,
            AddressFormIntent::ShowErrors,
        )?;
        let profile_id = profile_document_id.to_string();
        let address_id = address_document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.update_address(address_id, input)).await;
            if outcome.value().is_some() {
                scope.set(&inner.address_form, AddressFormState::default());
                inner.load_profile(&scope, &profile_id);
            }
            outcome.map(|_| "Address updated".to_string())
        });
        Ok(())
    }

    pub fn delete_address(&self, profile_document_id: &str, address_document_id: &str) {
        let profile_id = profile_document_id.to_string();
        let address_id = address_document_id.to_string();
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.delete_address(address_id)).await;
            if outcome.value().is_some() {
                inner.load_profile(&scope, &profile_id);
            }
            outcome.map(|_| "Address deleted".to_string())
        });
    }

    /// Abort in-flight work; slots keep their last value.
    pub fn cancel(&self) {
        self.scope.cancel();
    }

    fn run_action<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<ProfileInner>, ScopeHandle) -> Fut + Send + 'static,
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
