//! HTTP services: one backend call per method.
//!
//! Services never fail with `Err`; every outcome, including transport
//! failures, arrives as a [`RequestState`](crate::RequestState).

mod advert_service;
mod auth_service;
mod client;
mod error;
mod logger_service;
mod profile_service;
mod query;

pub use advert_service::{AdvertQuery, AdvertService};
pub use auth_service::AuthService;
pub use client::{ApiClient, ClientError};
pub use error::ApiError;
pub use logger_service::LoggerService;
pub use profile_service::ProfileService;
pub use query::StrapiQuery;
