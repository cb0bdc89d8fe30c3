use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// Users-permissions user. `profile` is only present when populated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Body of `POST /api/auth/local`. Not wrapped in `data`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Body of `POST /api/auth/local/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: User,
}
