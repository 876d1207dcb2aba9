//! JSON transport for the ordering API.

mod url;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use kbg_core::ClientConfig;

use crate::error::KbgError;

pub(crate) use url::endpoint_url;

pub(crate) const LOCALES_PATH: &str = "/locales";
pub(crate) const AVAILABLE_PATH: &str = "/available";
pub(crate) const INIT_PATH: &str = "/init";
pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const CONSUMER_PATH: &str = "/api/consumer";
pub(crate) const ORDERS_PATH: &str = "/api/orders/fetch-for-consumer";
pub(crate) const ORDER_DETAIL_PATH: &str = "/api/orders/fetch-detail";

/// Issues JSON requests against the API base URL.
///
/// Every request sends `Accept` and `Content-Type: application/json` and the
/// configured `User-Agent`. Once a bearer token is set it is attached to
/// every request unless the caller passes its own `Authorization` header.
///
/// Non-2xx responses become typed errors. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    authorization: Option<HeaderValue>,
}

impl Transport {
    /// Creates an anonymous transport with the configured timeouts and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`KbgError::InvalidBaseUrl`] if `config.api_url` is not an absolute URL.
    /// - [`KbgError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, KbgError> {
        endpoint_url(&config.api_url, "/", &[])?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            authorization: None,
        })
    }

    /// Returns this transport with `token` attached as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`KbgError::InvalidToken`] if the token cannot be sent as an
    /// HTTP header value.
    pub fn with_token(mut self, token: &str) -> Result<Self, KbgError> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| KbgError::InvalidToken)?;
        value.set_sensitive(true);
        self.authorization = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.authorization.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path?query`, decoding the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, KbgError> {
        self.request(Method::GET, path, query, None, HeaderMap::new())
            .await
    }

    /// `POST path` with a JSON body, decoding the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, KbgError> {
        self.request(Method::POST, path, &[], Some(body), HeaderMap::new())
            .await
    }

    /// Sends one request and decodes the JSON response.
    ///
    /// `headers` are applied over the default JSON headers. The bearer token
    /// is only added when `headers` has no `Authorization` entry.
    ///
    /// # Errors
    ///
    /// - [`KbgError::InvalidBaseUrl`] if the endpoint URL cannot be built.
    /// - [`KbgError::Http`] on connection, TLS or timeout failures.
    /// - [`KbgError::NotFound`] on HTTP 404.
    /// - [`KbgError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`KbgError::Deserialize`] if the body is not the expected JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<T, KbgError> {
        let url = endpoint_url(&self.base_url, path, query)?;
        tracing::debug!(%method, url = %url, authenticated = self.has_token(), "sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .headers(self.request_headers(headers));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(KbgError::NotFound { url });
        }

        if !status.is_success() {
            return Err(KbgError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| KbgError::Deserialize {
            context: format!("{method} {path}"),
            source: e,
        })
    }

    fn request_headers(&self, overrides: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(overrides);

        if let Some(authorization) = &self.authorization {
            if !headers.contains_key(AUTHORIZATION) {
                headers.insert(AUTHORIZATION, authorization.clone());
            }
        }
        headers
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
