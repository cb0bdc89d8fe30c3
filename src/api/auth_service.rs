use crate::api::client::ApiClient;
use crate::api::query::StrapiQuery;
use crate::model::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::RequestState;

/// Users-permissions endpoints.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/auth/local`
    pub async fn login(&self, identifier: &str, password: &str) -> RequestState<AuthResponse> {
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        self.client.post(&["auth", "local"], &body).await
    }

    /// `POST /api/auth/local/register`
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> RequestState<AuthResponse> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post(&["auth", "local", "register"], &body).await
    }

    /// `GET /api/users/me` with the linked profile populated.
    ///
    /// Unlike content types, users are returned bare (no `data` envelope).
    pub async fn me(&self) -> RequestState<User> {
        let query = StrapiQuery::new().populate(&["profile"]);
        self.client.get(&["users", "me"], &query).await
    }
}
