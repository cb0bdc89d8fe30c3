//! Client library for the adverts marketplace and cow logger backed by a
//! Strapi CMS.
//!
//! ```text
//! model ──→ config / api::client ──→ api services ──→ repository ──→ ui holders ──→ view
//! ```
//!
//! Every operation travels through the same shape: a service performs one
//! HTTP call and maps the status code to a [`RequestState`], a repository
//! turns that call into a stream that emits `Loading` first, and a
//! presentation holder copies the stream into an observable slot.

pub mod api;
pub mod config;
pub mod context;
pub mod logging;
pub mod model;
pub mod repository;
pub mod request_state;
pub mod ui;
pub mod view;

pub use request_state::{dispatch, RequestState};
