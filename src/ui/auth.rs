//! Login, registration and the current user.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use super::forms::{
    apply, check, FieldErrors, LoginFormIntent, LoginFormReducer, LoginFormState,
    RegisterFormIntent, RegisterFormReducer, RegisterFormState,
};
use super::observable::Observable;
use super::scope::{HolderScope, ScopeHandle};
use super::status::{run_action, ActionStatus};
use crate::config::{CredentialProvider, SecureString, Session, SessionError};
use crate::model::{AuthResponse, User};
use crate::repository::{terminal, AuthRepository};
use crate::RequestState;

pub struct AuthHolder {
    inner: Arc<AuthInner>,
    scope: HolderScope,
}

struct AuthInner {
    repository: AuthRepository,
    credentials: Arc<dyn CredentialProvider>,
    logged_in: Observable<bool>,
    user: Observable<RequestState<User>>,
    login_form: Observable<LoginFormState>,
    register_form: Observable<RegisterFormState>,
    status: ActionStatus,
}

impl AuthInner {
    /// Persist the session from a successful auth response.
    fn sign_in(&self, scope: &ScopeHandle, response: AuthResponse) -> RequestState<String> {
        let session = Session {
            jwt: SecureString::new(response.jwt),
            user_id: response.user.id,
            email: response.user.email.clone(),
            username: response.user.username.clone(),
        };
        if let Err(e) = self.credentials.store(session) {
            return RequestState::Error(format!("Could not save session: {}", e));
        }
        tracing::info!(user_id = response.user.id, "Signed in");
        scope.set(&self.logged_in, true);
        let username = response.user.username.clone();
        let stamp = self.user.issue();
        scope.publish(&self.user, stamp, RequestState::Success(response.user));
        RequestState::Success(format!("Signed in as {}", username))
    }
}

impl AuthHolder {
    /// The logged-in flag starts from whatever session the provider holds.
    pub fn new(repository: AuthRepository, credentials: Arc<dyn CredentialProvider>) -> Self {
        let logged_in = credentials.is_logged_in();
        Self {
            inner: Arc::new(AuthInner {
                repository,
                credentials,
                logged_in: Observable::new(logged_in),
                user: Observable::new(RequestState::Idle),
                login_form: Observable::new(LoginFormState::default()),
                register_form: Observable::new(RegisterFormState::default()),
                status: ActionStatus::new(),
            }),
            scope: HolderScope::new(),
        }
    }

    pub fn logged_in(&self) -> watch::Receiver<bool> {
        self.inner.logged_in.subscribe()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.logged_in.get()
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.credentials.session()
    }

    pub fn user(&self) -> watch::Receiver<RequestState<User>> {
        self.inner.user.subscribe()
    }

    pub fn login_form(&self) -> watch::Receiver<LoginFormState> {
        self.inner.login_form.subscribe()
    }

    pub fn login_form_state(&self) -> LoginFormState {
        self.inner.login_form.get()
    }

    pub fn register_form(&self) -> watch::Receiver<RegisterFormState> {
        self.inner.register_form.subscribe()
    }

    pub fn register_form_state(&self) -> RegisterFormState {
        self.inner.register_form.get()
    }

    pub fn status(&self) -> &ActionStatus {
        &self.inner.status
    }

    pub fn edit_login(&self, intent: LoginFormIntent) {
        apply::<LoginFormReducer>(&self.inner.login_form, intent);
    }

    pub fn edit_register(&self, intent: RegisterFormIntent) {
        apply::<RegisterFormReducer>(&self.inner.register_form, intent);
    }

    pub fn login(&self) -> Result<(), FieldErrors> {
        let request = check::<LoginFormReducer, _>(
            &self.inner.login_form,
            LoginFormState::validate,
            LoginFormIntent::ShowErrors,
        )?;
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.login(request.identifier, request.password)).await;
            match outcome {
                RequestState::Success(response) => {
                    scope.set(&inner.login_form, LoginFormState::default());
                    inner.sign_in(&scope, response)
                }
                other => other.map(|_| String::new()),
            }
        });
        Ok(())
    }

    pub fn register(&self) -> Result<(), FieldErrors> {
        let request = check::<RegisterFormReducer, _>(
            &self.inner.register_form,
            RegisterFormState::validate,
            RegisterFormIntent::ShowErrors,
        )?;
        self.run_action(move |inner, scope| async move {
            let outcome = terminal(inner.repository.register(
                request.username,
                request.email,
                request.password,
            ))
            .await;
            match outcome {
                RequestState::Success(response) => {
                    scope.set(&inner.register_form, RegisterFormState::default());
                    inner.sign_in(&scope, response)
                }
                other => other.map(|_| String::new()),
            }
        });
        Ok(())
    }

    /// Forget the session. In-flight requests keep whatever token they
    /// already attached.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.inner.credentials.clear()?;
        tracing::info!("Signed out");
        let scope = self.scope.handle();
        scope.set(&self.inner.logged_in, false);
        let stamp = self.inner.user.issue();
        scope.publish(&self.inner.user, stamp, RequestState::Idle);
        Ok(())
    }

    /// Fetch `/users/me` into the `user` slot.
    pub fn load_me(&self) {
        self.scope
            .handle()
            .collect(self.inner.repository.me(), self.inner.user.clone());
    }

    pub fn cancel(&self) {
        self.scope.cancel();
    }

    fn run_action<F, Fut>(&self, action: F)
    where
        F: FnOnce(Arc<AuthInner>, ScopeHandle) -> Fut + Send + 'static,
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
