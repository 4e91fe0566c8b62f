//! HTTP transport for the orders/products backend

use crate::error::ApiError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Validate a backend base URL
    ///
    /// A trailing slash is dropped so resource paths can be appended as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL does not parse or is not http(s).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Uniform response body: `{success, status, data}`
///
/// `status` is reported by the backend inside the body and is what the
/// services check, independently of the HTTP status line.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Envelope {
    /// Application-level success flag
    pub success: bool,
    /// Status reported by the backend
    pub status: u16,
    /// Payload, or `{message}` on failure
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Message carried in `data.message`, if any
    #[must_use]
    pub fn message(&self) -> String {
        self.data
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Check `success` and the expected status without decoding the payload
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`] when `success` is false
    /// - [`ApiError::UnexpectedStatus`] when the status does not match
    pub fn ensure(&self, expected: StatusCode) -> Result<(), ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                status: self.status,
                message: self.message(),
            });
        }

        if self.status != expected.as_u16() {
            return Err(ApiError::UnexpectedStatus {
                expected: expected.as_u16(),
                actual: self.status,
                message: self.message(),
            });
        }

        Ok(())
    }

    /// Check the envelope and decode its payload
    ///
    /// # Errors
    ///
    /// Everything [`Envelope::ensure`] returns, plus [`ApiError::Decode`]
    /// when the payload has the wrong shape.
    pub fn into_data<T: DeserializeOwned>(self, expected: StatusCode) -> Result<T, ApiError> {
        self.ensure(expected)?;
        serde_json::from_value(self.data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// HTTP transport shared by the resource services
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    base_url: String,
}

impl Transport {
    /// Build a transport with JSON content type and the configured timeout
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}{path}`
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn get(&self, path: &str) -> Result<Envelope, ApiError> {
        self.request::<()>(Method::GET, path, None).await
    }

    /// `POST {base}{path}` with a JSON body
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PATCH {base}{path}` with a JSON body
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// `DELETE {base}{path}`
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn delete(&self, path: &str) -> Result<Envelope, ApiError> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    /// Send a request and decode the response envelope
    ///
    /// Non-2xx responses whose body is still an envelope are returned as
    /// such, so the caller sees the backend's own status and message.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if no response was received
    /// - [`ApiError::Rejected`] for a non-2xx response without an envelope body
    /// - [`ApiError::Decode`] for a 2xx response without an envelope body
    pub async fn request<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope, ApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let http_status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(e) if http_status.is_success() => Err(ApiError::Decode(e.to_string())),
            Err(_) => Err(ApiError::Rejected {
                status: http_status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn config_rejects_non_http_urls() {
        assert!(matches!(
            ApiConfig::new("ftp://example.com", DEFAULT_TIMEOUT),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url", DEFAULT_TIMEOUT),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = ApiConfig::new("http://localhost:3000/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn into_data_requires_expected_status() {
        let env = envelope(json!({ "success": true, "status": 200, "data": { "id": "x" } }));
        let err = env.into_data::<serde_json::Value>(StatusCode::CREATED).unwrap_err();
        assert_eq!(
            err,
            ApiError::UnexpectedStatus {
                expected: 201,
                actual: 200,
                message: String::new(),
            }
        );
    }

    #[test]
    fn into_data_surfaces_rejection_message() {
        let env = envelope(json!({
            "success": false,
            "status": 404,
            "data": { "message": "Order not found" }
        }));
        let err = env.into_data::<serde_json::Value>(StatusCode::OK).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Request rejected (status 404): Order not found");
    }

    #[test]
    fn into_data_reports_shape_mismatch() {
        let env = envelope(json!({ "success": true, "status": 200, "data": "oops" }));
        assert!(matches!(
            env.into_data::<Vec<u32>>(StatusCode::OK),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn ensure_accepts_missing_payload() {
        let env = envelope(json!({ "success": true, "status": 200 }));
        assert!(env.ensure(StatusCode::OK).is_ok());
    }
}
