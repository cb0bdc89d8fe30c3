//! Wiring from configuration to holders.

use std::sync::Arc;

use crate::api::{
    AdvertService, ApiClient, AuthService, ClientError, LoggerService, ProfileService,
};
use crate::config::{Config, CredentialProvider};
use crate::repository::{AdvertRepository, AuthRepository, LoggerRepository, ProfileRepository};
use crate::ui::{AdvertsHolder, AuthHolder, LoggerHolder, ProfileHolder};

/// Shared client and settings; hands out one holder per screen.
pub struct AppContext {
    config: Config,
    credentials: Arc<dyn CredentialProvider>,
    client: ApiClient,
}

impl AppContext {
    pub fn new(config: Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self, ClientError> {
        let client = ApiClient::new(&config.api, Arc::clone(&credentials))?;
        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    pub fn auth_holder(&self) -> AuthHolder {
        let repository = AuthRepository::new(
            AuthService::new(self.client.clone()),
            self.config.ui.loading_delay(),
        );
        AuthHolder::new(repository, Arc::clone(&self.credentials))
    }

    pub fn adverts_holder(&self) -> AdvertsHolder {
        AdvertsHolder::new(
            self.advert_repository(),
            self.profile_repository(),
            self.config.ui.page_size,
        )
    }

    pub fn profile_holder(&self) -> ProfileHolder {
        ProfileHolder::new(self.profile_repository())
    }

    pub fn logger_holder(&self) -> LoggerHolder {
        let repository = LoggerRepository::new(
            LoggerService::new(self.client.clone()),
            self.config.ui.loading_delay(),
        );
        LoggerHolder::new(repository, self.config.ui.page_size)
    }

    fn advert_repository(&self) -> AdvertRepository {
        AdvertRepository::new(
            AdvertService::new(self.client.clone()),
            self.config.ui.loading_delay(),
        )
    }

    fn profile_repository(&self) -> ProfileRepository {
        ProfileRepository::new(
            ProfileService::new(self.client.clone()),
            self.config.ui.loading_delay(),
        )
    }
}
