//! Serializable mirrors of the Strapi content types.
//!
//! Records are plain data. Field names follow Strapi's camelCase JSON;
//! relations and media that the CMS may omit are `Option` or default to
//! empty collections.

mod advert;
mod auth;
mod envelope;
mod logger;
mod media;
mod profile;

pub use advert::{Advert, AdvertInput, Category};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, User};
pub use envelope::{DataWrapper, ListMeta, ListResponse, Pagination, SingleResponse};
pub use logger::{Logger, LoggerInput};
pub use media::{Image, ImageFormat, ImageFormats, UploadFile};
pub use profile::{Address, AddressInput, Profile, ProfileInput, ProfileRelation};
