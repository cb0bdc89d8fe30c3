//! "Create a child, then link it to the parent" sequencing.
//!
//! The two steps are separate requests. There is no rollback: when the
//! link fails the child stays created and the outcome says so.

use crate::repository::{terminal, StateStream};
use crate::RequestState;

#[derive(Debug, Clone, PartialEq)]
pub enum ChainOutcome<C> {
    /// Both steps succeeded.
    Linked(C),
    /// Step one failed; step two was not attempted.
    NotCreated(String),
    /// Step one succeeded, step two failed.
    NotLinked { child: C, message: String },
}

impl<C> ChainOutcome<C> {
    /// Whether the child exists on the server.
    pub fn created(&self) -> bool {
        !matches!(self, ChainOutcome::NotCreated(_))
    }

    /// Collapse into a user-facing outcome; `what` names the child ("Address").
    pub fn into_state(self, what: &str) -> RequestState<String> {
        match self {
            ChainOutcome::Linked(_) => RequestState::Success(format!("{} created", what)),
            ChainOutcome::NotCreated(message) => RequestState::Error(message),
            ChainOutcome::NotLinked { message, .. } => RequestState::Error(format!(
                "{} created but not linked to profile: {}",
                what, message
            )),
        }
    }
}

/// Run `create`; only if it succeeds, run the stream built by `link`.
pub async fn create_then_link<C, P, L>(create: StateStream<C>, link: L) -> ChainOutcome<C>
where
    L: FnOnce(&C) -> StateStream<P>,
{
    let child = match terminal(create).await {
        RequestState::Success(child) => child,
        other => return ChainOutcome::NotCreated(failure_message(other)),
    };

    match terminal(link(&child)).await {
        RequestState::Success(_) => ChainOutcome::Linked(child),
        other => ChainOutcome::NotLinked {
            child,
            message: failure_message(other),
        },
    }
}

fn failure_message<T>(state: RequestState<T>) -> String {
    state
        .error_message()
        .unwrap_or("Request ended without a result")
        .to_string()
}
