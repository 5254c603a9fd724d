//! REST client for the marketplace backend HTTP endpoints.
//!
//! Implements [`ModerationService`] and [`ContextLookupService`] over
//! [`reqwest`]. Bulk operations use the trait-provided fan-out, so each
//! member is an independent HTTP call that settles on its own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;

use heavyhire_core::types::{ContextId, MediaId};

use crate::config::BackendConfig;
use crate::error::ServiceError;
use crate::service::{ContextLookupService, ModerationService};
use crate::types::{
    EquipmentDetail, EquipmentTypeDetail, ListMediaQuery, MediaPage, ModerationDecision,
    RentalRequestDetail,
};

/// HTTP client for the marketplace backend.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl BackendClient {
    /// Create a client from connection settings.
    pub fn new(config: &BackendConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling with other dashboard services).
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    /// Start a request against `path`, attaching the bearer token and a
    /// fresh correlation id.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("x-request-id", uuid::Uuid::new_v4().to_string());
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`ServiceError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ModerationService for BackendClient {
    async fn list_media(&self, query: &ListMediaQuery) -> Result<MediaPage, ServiceError> {
        let response = self
            .request(Method::GET, "/moderation/media")
            .query(&query.to_query())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn approve_media(&self, id: &MediaId) -> Result<ModerationDecision, ServiceError> {
        let response = self
            .request(Method::POST, &format!("/moderation/media/{id}/approve"))
            .send()
            .await?;
        let decision: ModerationDecision = Self::parse_response(response).await?;
        tracing::info!(media_id = %id, "Media approved");
        Ok(decision)
    }

    async fn reject_media(
        &self,
        id: &MediaId,
        reason: Option<&str>,
    ) -> Result<ModerationDecision, ServiceError> {
        let body = serde_json::json!({ "reason": reason });
        let response = self
            .request(Method::POST, &format!("/moderation/media/{id}/reject"))
            .json(&body)
            .send()
            .await?;
        let decision: ModerationDecision = Self::parse_response(response).await?;
        tracing::info!(media_id = %id, reason = ?reason, "Media rejected");
        Ok(decision)
    }
}

#[async_trait]
impl ContextLookupService for BackendClient {
    async fn rental_request(&self, id: &ContextId) -> Result<RentalRequestDetail, ServiceError> {
        let response = self
            .request(Method::GET, &format!("/rental-requests/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn equipment(&self, id: &ContextId) -> Result<EquipmentDetail, ServiceError> {
        let response = self
            .request(Method::GET, &format!("/equipment/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn equipment_type(&self, id: &ContextId) -> Result<EquipmentTypeDetail, ServiceError> {
        let response = self
            .request(Method::GET, &format!("/equipment-types/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
