//! HTTP client for the fleet portal's REST backend.
//!
//! Wraps reqwest with the portal's cross-cutting request policy: a fixed
//! 60-second timeout, bearer-token injection from a [`SessionStore`], and
//! session invalidation on any 401 - the stored credential is cleared so the
//! shell can route to the login screen. Generic JSON/multipart helpers live
//! here; domain methods are in [`api`].

pub mod api;

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fleetdoc_core::PortalConfig;

/// Where the bearer credential lives between requests.
///
/// The shell owns the concrete store (browser storage, keychain, ...); the
/// client only reads the token and clears it when the backend rejects it.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn clear(&self);
}

/// Simple in-process session store.
#[derive(Debug, Default)]
pub struct InMemorySession {
    token: Mutex<Option<String>>,
}

impl InMemorySession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for InMemorySession {
    fn token(&self) -> Option<String> {
        // Recover the guard on poison: a panicked writer must not break
        // every later request.
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Typed client errors. `Unauthorized` is distinct so callers can trigger
/// the login redirect; everything else is toast-and-retry territory.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session is no longer valid")]
    Unauthorized,

    #[error("API request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<ApiError> for fleetdoc_core::AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => fleetdoc_core::AppError::Unauthorized(err.to_string()),
            other => fleetdoc_core::AppError::Api(other.to_string()),
        }
    }
}

/// HTTP client with the portal's request policy baked in.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &PortalConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Shared response policy: 401 invalidates the session, other non-2xx
    /// statuses surface with the response body.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected credential, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET with optional query parameters, deserializing the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(self.build_url(path));
        request = self.apply_auth(request);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.check(request.send().await?).await?;
        Self::decode(response).await
    }

    /// POST a JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = self.check(request.send().await?).await?;
        Self::decode(response).await
    }

    /// PUT a JSON body and deserialize the response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body));
        let response = self.check(request.send().await?).await?;
        Self::decode(response).await
    }

    /// POST a multipart form and deserialize the response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).multipart(form));
        let response = self.check(request.send().await?).await?;
        Self::decode(response).await
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.apply_auth(self.client.delete(self.build_url(path)));
        self.check(request.send().await?).await?;
        Ok(())
    }
}

pub use api::DocumentUploadParts;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_session_clear() {
        let session = InMemorySession::new("tok-123");
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let config = PortalConfig {
            api_base_url: "https://api.example.test/".to_string(),
            ..PortalConfig::default()
        };
        let client = ApiClient::new(&config, Arc::new(InMemorySession::default())).unwrap();
        assert_eq!(
            client.build_url("/vehicles"),
            "https://api.example.test/vehicles"
        );
    }

    fn client_with_session(token: &str) -> (ApiClient, Arc<InMemorySession>) {
        let session = Arc::new(InMemorySession::new(token));
        let client = ApiClient::new(&PortalConfig::default(), session.clone()).unwrap();
        (client, session)
    }

    fn response_with_status(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_401_clears_session_and_returns_unauthorized() {
        let (client, session) = client_with_session("tok-123");

        let err = client
            .check(response_with_status(401, "token rejected"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_non_401_failure_keeps_session() {
        let (client, session) = client_with_session("tok-123");

        let err = client
            .check(response_with_status(500, "boom"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Http {
                status: 500,
                ref message
            } if message.as_str() == "boom"
        ));
        assert_eq!(session.token().as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (client, session) = client_with_session("tok-123");

        let response = client.check(response_with_status(200, "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(session.token().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_poisoned_session_lock_recovers() {
        let session = Arc::new(InMemorySession::new("tok-123"));
        let poisoner = session.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.token.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();

        // Both accessors still work on the poisoned lock.
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_unauthorized_maps_to_app_error() {
        let app: fleetdoc_core::AppError = ApiError::Unauthorized.into();
        assert!(matches!(app, fleetdoc_core::AppError::Unauthorized(_)));

        let app: fleetdoc_core::AppError = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(app, fleetdoc_core::AppError::Api(_)));
    }
}
