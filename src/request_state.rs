//! Lifecycle of a single asynchronous operation.

use crate::ui::mvi::UiState;

/// State of one request, from "never asked" to a terminal outcome.
///
/// Every invocation moves through `Loading` before reaching `Success` or
/// `Error`. Errors carry a human-readable message only.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// Nothing has been requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The request completed with a decoded payload.
    Success(T),
    /// The request failed.
    Error(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> UiState for RequestState<T> where T: Clone + PartialEq + Send + Sync + 'static {}

impl<T> RequestState<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> RequestState<&T> {
        match self {
            Self::Idle => RequestState::Idle,
            Self::Loading => RequestState::Loading,
            Self::Success(value) => RequestState::Success(value),
            Self::Error(message) => RequestState::Error(message.clone()),
        }
    }

    /// Transform the success payload, leaving other variants untouched.
    pub fn map<U, F>(self, f: F) -> RequestState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Idle => RequestState::Idle,
            Self::Loading => RequestState::Loading,
            Self::Success(value) => RequestState::Success(f(value)),
            Self::Error(message) => RequestState::Error(message),
        }
    }

    /// Prefix the error message, e.g. to mark a partially applied chain.
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self {
            Self::Error(message) => Self::Error(f(message)),
            other => other,
        }
    }
}

impl<T, E> From<Result<T, E>> for RequestState<T>
where
    E: std::fmt::Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

/// Render a request state by invoking exactly one of the three callbacks.
///
/// `Idle` has nothing to render and invokes none of them; the return value
/// is `None` in that case.
pub fn dispatch<T, R>(
    state: &RequestState<T>,
    on_loading: impl FnOnce() -> R,
    on_success: impl FnOnce(&T) -> R,
    on_error: impl FnOnce(&str) -> R,
) -> Option<R> {
    match state {
        RequestState::Idle => None,
        RequestState::Loading => Some(on_loading()),
        RequestState::Success(value) => Some(on_success(value)),
        RequestState::Error(message) => Some(on_error(message)),
    }
}
