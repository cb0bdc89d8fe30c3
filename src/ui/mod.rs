//! Presentation layer: observable slots and per-screen holders.
//!
//! A holder owns one slot per independent piece of server state and a
//! [`HolderScope`](scope::HolderScope) for the work its intents launch.
//! Views read slots through `watch` receivers and render them with
//! [`dispatch`](crate::dispatch).

pub mod adverts;
pub mod auth;
pub mod chain;
pub mod forms;
pub mod logger;
pub mod mvi;
pub mod observable;
pub mod profile;
pub mod scope;
pub mod status;

pub use adverts::AdvertsHolder;
pub use auth::AuthHolder;
pub use logger::LoggerHolder;
pub use observable::{settled, Observable, Stamp};
pub use profile::ProfileHolder;
pub use scope::{HolderScope, ScopeHandle};
pub use status::ActionStatus;
