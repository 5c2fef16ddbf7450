//! JSON client for one resolved role backend.
//!
//! Thin wrapper over a shared `reqwest::Client`: joins endpoint paths onto
//! the role's base URL, sends/receives JSON, and turns non-2xx responses
//! into [`ApiError::Api`] carrying the server's own `error`/`error_message`
//! text verbatim when present, else a caller-supplied fallback.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use mealdrop_core::Role;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Client for one role backend base.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    http: reqwest::Client,
    base: Url,
}

/// Error body shape shared by the backends.
///
/// Auth endpoints answer `{error_message}`, order/menu endpoints `{error}`.
#[derive(Debug, serde::Deserialize)]
struct WireError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl ApiClient {
    /// Create a client for an explicit base URL.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base,
            }),
        }
    }

    /// Create a client for a role, resolving its base from the config.
    ///
    /// A missing role resolves to the customer base.
    #[must_use]
    pub fn for_role(config: &ClientConfig, role: Option<Role>) -> Self {
        Self::new(config.bases.base_for(role).clone())
    }

    /// The resolved base URL.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.inner.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base.join(path)?)
    }

    /// `GET {base}/{path}?{query}` decoding a JSON body.
    ///
    /// # Errors
    ///
    /// `ApiError::Api` with the server or fallback message on non-2xx,
    /// `ApiError::Http`/`ApiError::Decode` on transport or body failures.
    #[instrument(skip(self, query), fields(base = %self.inner.base, path))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        fallback: &str,
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let response = self.inner.http.get(url).send().await?;
        Self::decode(response, fallback).await
    }

    /// `POST {base}/{path}` with a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get_json`].
    #[instrument(skip(self, body), fields(base = %self.inner.base, path))]
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.http.post(url).json(body).send().await?;
        Self::decode(response, fallback).await
    }

    /// `POST {base}/{path}` where only success/failure matters.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get_json`], minus decode errors.
    #[instrument(skip(self, body), fields(base = %self.inner.base, path))]
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.http.post(url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(Self::api_error(status, &text, fallback))
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &text, fallback));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "failed to decode backend response"
            );
            ApiError::Decode(e)
        })
    }

    fn api_error(status: reqwest::StatusCode, body: &str, fallback: &str) -> ApiError {
        let message = serde_json::from_str::<WireError>(body)
            .ok()
            .and_then(|wire| wire.error_message.or(wire.error))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        tracing::debug!(status = %status, message = %message, "backend returned an error");
        ApiError::Api { message }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_error_both_spellings() {
        let auth: WireError = serde_json::from_str(r#"{"error_message":"bad login"}"#).unwrap();
        assert_eq!(auth.error_message.as_deref(), Some("bad login"));

        let orders: WireError = serde_json::from_str(r#"{"error":"items must not be empty"}"#).unwrap();
        assert_eq!(orders.error.as_deref(), Some("items must not be empty"));
    }

    #[test]
    fn test_api_error_prefers_server_message() {
        let err = ApiClient::api_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":"customer_id must be UUID"}"#,
            "Failed to create order",
        );
        assert_eq!(err.user_message(), "customer_id must be UUID");
    }

    #[test]
    fn test_api_error_falls_back_on_opaque_body() {
        let err = ApiClient::api_error(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>oops</html>",
            "Failed to create order",
        );
        assert_eq!(err.user_message(), "Failed to create order");
    }

    #[test]
    fn test_api_error_falls_back_on_empty_message() {
        let err = ApiClient::api_error(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":""}"#,
            "Failed to load orders",
        );
        assert_eq!(err.user_message(), "Failed to load orders");
    }

    #[test]
    fn test_endpoint_join() {
        let client = ApiClient::new("http://localhost:8091".parse().unwrap());
        let url = client.endpoint("orders").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8091/orders");
    }
}
