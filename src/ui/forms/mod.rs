//! Form state machines and local validation.
//!
//! Edits go through a [`Reducer`](crate::ui::mvi::Reducer); `validate`
//! turns a form into the request input or the per-field errors. Nothing
//! here touches the network.

mod address;
mod advert;
mod auth;
mod logger;
mod profile;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::ui::mvi::Reducer;
use crate::ui::observable::Observable;

pub use address::{AddressFormIntent, AddressFormReducer, AddressFormState};
pub use advert::{AdvertFormIntent, AdvertFormReducer, AdvertFormState};
pub use auth::{
    LoginFormIntent, LoginFormReducer, LoginFormState, RegisterFormIntent, RegisterFormReducer,
    RegisterFormState,
};
pub use logger::{LoggerFormIntent, LoggerFormReducer, LoggerFormState};
pub use profile::{ProfileFormIntent, ProfileFormReducer, ProfileFormState};

/// Field name -> message.
pub type FieldErrors = BTreeMap<&'static str, String>;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]{6,20}$").expect("valid phone regex"));

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z -]{3,10}$").expect("valid postal code regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{} is required", label));
    }
}

fn check_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, "Email is required".to_string());
    } else if !EMAIL.is_match(value.trim()) {
        errors.insert(field, "Enter a valid email address".to_string());
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Apply one edit to a form slot.
pub(crate) fn apply<R>(form: &Observable<R::State>, intent: R::Intent)
where
    R: Reducer,
    R::State: Sync,
{
    form.update(|state| *state = R::reduce(std::mem::take(state), intent));
}

/// Validate the current form; on failure the errors are shown on the form
/// before returning, so the caller can bail out without any request.
pub(crate) fn check<R, I>(
    form: &Observable<R::State>,
    validate: impl FnOnce(&R::State) -> Result<I, FieldErrors>,
    show_errors: impl FnOnce(FieldErrors) -> R::Intent,
) -> Result<I, FieldErrors>
where
    R: Reducer,
    R::State: Sync,
{
    match validate(&form.get()) {
        Ok(input) => Ok(input),
        Err(errors) => {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Form validation failed");
            apply::<R>(form, show_errors(errors.clone()));
            Err(errors)
        }
    }
}
