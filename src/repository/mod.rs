//! Repositories adapt single-shot service calls into state streams.
//!
//! Every stream yields `Loading` as soon as it is polled, then exactly one
//! terminal value (`Success` or `Error`), then ends. The service call is
//! not started until the stream is polled past `Loading`, and dropping the
//! stream cancels it.

mod advert;
mod auth;
mod logger;
mod profile;

use std::future::Future;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};

use crate::RequestState;

pub use advert::AdvertRepository;
pub use auth::AuthRepository;
pub use logger::LoggerRepository;
pub use profile::ProfileRepository;

/// Stream of states for one operation.
pub type StateStream<T> = BoxStream<'static, RequestState<T>>;

/// Wrap a service call: `Loading`, optional delay, terminal value.
pub fn state_stream<T, F>(loading_delay: Duration, call: F) -> StateStream<T>
where
    T: Send + 'static,
    F: Future<Output = RequestState<T>> + Send + 'static,
{
    let terminal = async move {
        let state = call.await;
        if !loading_delay.is_zero() {
            tokio::time::sleep(loading_delay).await;
        }
        state
    };
    stream::once(async { RequestState::Loading })
        .chain(stream::once(terminal))
        .boxed()
}

/// Drain a stream and return its terminal value.
///
/// A stream that ends without one yields an error rather than `Loading`.
pub async fn terminal<T>(mut states: StateStream<T>) -> RequestState<T> {
    let mut last = RequestState::Error("Request ended without a result".to_string());
    while let Some(state) = states.next().await {
        if state.is_terminal() {
            last = state;
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_loading_then_terminal() {
        let states: Vec<_> = state_stream(Duration::ZERO, async { RequestState::Success(5u8) })
            .collect()
            .await;
        assert_eq!(states, vec![RequestState::Loading, RequestState::Success(5)]);
    }

    #[tokio::test]
    async fn call_does_not_start_before_loading_is_observed() {
        let started = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = started.clone();
        let mut states = state_stream(Duration::ZERO, async move {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
            RequestState::Success(())
        });
        assert_eq!(states.next().await, Some(RequestState::Loading));
        assert!(!started.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(states.next().await, Some(RequestState::Success(())));
        assert!(states.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn delay_holds_back_terminal_value() {
        let start = tokio::time::Instant::now();
        let states: Vec<_> = state_stream(Duration::from_millis(300), async {
            RequestState::<u8>::error("Resource not found")
        })
        .collect()
        .await;
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].error_message(), Some("Resource not found"));
    }

    #[tokio::test]
    async fn terminal_returns_last_value() {
        let state = terminal(state_stream(Duration::ZERO, async { RequestState::Success("ok") })).await;
        assert_eq!(state, RequestState::Success("ok"));
    }
}
