//! `reqwest` implementation of the feedback gateway.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ApiError;
use crate::api::models::{AnalyticsSnapshot, FeedbackItem, FixSentimentsReport, NewFeedback};
use crate::api::query::FeedbackQuery;

use super::FeedbackGateway;
use super::error_mapping::{map_http_error, map_reqwest_error};

/// Backend base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Upper bound for every request made by the client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP gateway shared by every view.
///
/// Each call is logged at `debug` level on dispatch and on response, and at
/// `warn` level when it fails.
#[derive(Debug, Clone)]
pub struct HttpFeedbackGateway {
    client: Client,
    base_url: Url,
}

impl HttpFeedbackGateway {
    /// Creates a gateway for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the URL cannot be parsed or is not
    /// HTTP(S), and [`ApiError::Configuration`] when the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Creates a gateway with a custom timeout.
    ///
    /// # Errors
    ///
    /// Same as [`HttpFeedbackGateway::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|error| ApiError::InvalidUrl(error.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{}' in {base_url}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| ApiError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let endpoint = self.endpoint(path);
        tracing::debug!(method = %method, url = %endpoint, "API request");
        (self.client.request(method, endpoint.as_str()), endpoint)
    }

    async fn send<T: DeserializeOwned>(
        operation: &str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|error| {
            let mapped = map_reqwest_error(operation, &error);
            tracing::warn!(url = %endpoint, "API request error: {mapped}");
            mapped
        })?;

        Self::decode(operation, endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        operation: &str,
        endpoint: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %endpoint, "API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = map_http_error(operation, status, &body);
            tracing::warn!(status = status.as_u16(), url = %endpoint, "API response error: {error}");
            return Err(error);
        }

        response.json::<T>().await.map_err(|error| {
            let mapped = map_reqwest_error(operation, &error);
            tracing::warn!(url = %endpoint, "API response decoding failed: {mapped}");
            mapped
        })
    }
}

#[async_trait]
impl FeedbackGateway for HttpFeedbackGateway {
    async fn create_feedback(&self, feedback: &NewFeedback) -> Result<FeedbackItem, ApiError> {
        let (request, endpoint) = self.request(Method::POST, "feedback");
        Self::send("submit feedback", &endpoint, request.json(feedback)).await
    }

    async fn list_feedback(&self, query: &FeedbackQuery) -> Result<Vec<FeedbackItem>, ApiError> {
        let (request, endpoint) = self.request(Method::GET, "feedback");
        Self::send("load feedback", &endpoint, request.query(&query.to_pairs())).await
    }

    async fn feedback_by_id(&self, id: u64) -> Result<FeedbackItem, ApiError> {
        let (request, endpoint) = self.request(Method::GET, &format!("feedback/{id}"));
        Self::send("load feedback record", &endpoint, request).await
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        let (request, endpoint) = self.request(Method::GET, "feedback/analytics");
        Self::send("load analytics", &endpoint, request).await
    }

    async fn fix_sentiments(&self) -> Result<FixSentimentsReport, ApiError> {
        let (request, endpoint) = self.request(Method::PUT, "feedback/fix-sentiments");
        Self::send("fix sentiments", &endpoint, request).await
    }
}
