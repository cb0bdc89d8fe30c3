//! Shared HTTP client for all services.
//!
//! Each helper performs exactly one request, attaches the bearer token when
//! a session is stored, and folds the outcome into a [`RequestState`].

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::error::ApiError;
use crate::api::query::StrapiQuery;
use crate::config::{build_auth_header, ApiConfig, CredentialProvider};
use crate::RequestState;

const READ_SUCCESS: &[StatusCode] = &[StatusCode::OK];
const CREATE_SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const DELETE_SUCCESS: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Errors building the client itself.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::BaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::BaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// `<base>/api/<segments...>?<query>`, with each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str], query: &StrapiQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.params());
        }
        url
    }

    pub async fn get<T>(&self, segments: &[&str], query: &StrapiQuery) -> RequestState<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, query);
        let builder = self.request(Method::GET, url);
        self.execute(builder, READ_SUCCESS).await.into()
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> RequestState<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, &StrapiQuery::new());
        let builder = self.request(Method::POST, url).json(body);
        self.execute(builder, CREATE_SUCCESS).await.into()
    }

    pub async fn put<B, T>(&self, segments: &[&str], query: &StrapiQuery, body: &B) -> RequestState<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, query);
        let builder = self.request(Method::PUT, url).json(body);
        self.execute(builder, READ_SUCCESS).await.into()
    }

    /// Bodiless delete: success is reported as `true`.
    pub async fn delete(&self, segments: &[&str]) -> RequestState<bool> {
        let url = self.endpoint(segments, &StrapiQuery::new());
        let builder = self.request(Method::DELETE, url);
        match self.send(builder, DELETE_SUCCESS).await {
            Ok(_) => RequestState::Success(true),
            Err(err) => RequestState::Error(err.to_string()),
        }
    }

    /// Multipart upload.
    pub async fn upload<T>(&self, segments: &[&str], form: Form) -> RequestState<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, &StrapiQuery::new());
        let builder = self.request(Method::POST, url).multipart(form);
        self.execute(builder, CREATE_SUCCESS).await.into()
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = %method, path = %url.path(), "Sending request");
        let mut builder = self.http.request(method, url);
        if let Some((name, value)) = build_auth_header(self.credentials.as_ref()) {
            builder = builder.header(name, value);
        }
        builder
    }

    async fn execute<T>(&self, builder: RequestBuilder, expected: &[StatusCode]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(builder, expected).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode response body");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send the request and return the body of an expected-status response.
    async fn send(&self, builder: RequestBuilder, expected: &[StatusCode]) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from_transport(&e);
            tracing::warn!(error = %e, "Request failed without a response");
            err
        })?;

        let status = response.status();
        let path = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        if expected.contains(&status) {
            tracing::debug!(status = status.as_u16(), path = %path, "Request succeeded");
            return Ok(body);
        }

        let err = ApiError::from_status(status, &body);
        tracing::warn!(status = status.as_u16(), path = %path, error = %err, "Request rejected");
        Err(err)
    }
}
