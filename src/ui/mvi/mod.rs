//! Model-View-Intent primitives shared by the presentation holders.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Form editing is a pure reducer; network work is driven by the holders
//! and lands in [`RequestState`](crate::RequestState) slots, which are
//! themselves `UiState`.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
