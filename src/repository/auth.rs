use std::time::Duration;

use super::{state_stream, StateStream};
use crate::api::AuthService;
use crate::model::{AuthResponse, User};

#[derive(Clone)]
pub struct AuthRepository {
    service: AuthService,
    loading_delay: Duration,
}

impl AuthRepository {
    pub fn new(service: AuthService, loading_delay: Duration) -> Self {
        Self {
            service,
            loading_delay,
        }
    }

    pub fn login(&self, identifier: String, password: String) -> StateStream<AuthResponse> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.login(&identifier, &password).await
        })
    }

    pub fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> StateStream<AuthResponse> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move {
            service.register(&username, &email, &password).await
        })
    }

    pub fn me(&self) -> StateStream<User> {
        let service = self.service.clone();
        state_stream(self.loading_delay, async move { service.me().await })
    }
}
