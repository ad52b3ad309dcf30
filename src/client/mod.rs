//! HTTP client wrapper for the PropConnect backend.
//!
//! The single outbound gateway: every request goes through [`ApiClient`],
//! which attaches the bearer token from the session store and the backend's
//! required default headers. Callers ask for a logical resource ("list
//! agents") and get either the typed resource or an [`ApiError`]; they never
//! see header or status-code handling.
//!
//! A 401 on any authenticated endpoint tears the session down exactly once
//! (memory and disk) before the error propagates. No failure class is
//! retried.

use crate::config::ApiConfig;
use crate::models::{
    Agent, ApiErrorBody, AppUser, DashboardStats, Inquiry, InquiryStatus, LoginResponse,
    PropertyListItem, PropertyPage, PropertyType, SoldPropertiesReport,
};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected our credential. The session has already been
    /// cleared by the time this surfaces.
    #[error("Session expired or invalid. Run `propconnect login` again.")]
    Unauthorized,

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Fields for `POST /api/admin/agents` (multipart).
#[derive(Debug, Clone)]
pub struct NewAgent {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub photo: Option<PathBuf>,
}

/// Query parameters for the server-paginated property listing.
#[derive(Debug, Clone, Default)]
pub struct PropertyQuery {
    /// Zero-based page index, matching the backend's convention.
    pub page: u32,
    pub size: u32,
    pub property_type: Option<PropertyType>,
    pub search: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("static header"),
        );
        // The backend sits behind an ngrok tunnel; without this header every
        // response is the interstitial warning page instead of JSON.
        headers.insert(
            "ngrok-skip-browser-warning",
            "true".parse().expect("static header"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and enforce the auth contract on the response.
    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            debug!("Received 401, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = Self::error_message(response, status).await;
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn error_message(response: Response, status: StatusCode) -> String {
        response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            })
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// `POST /api/auth/admin/login`. Deliberately bypasses the 401 teardown:
    /// a rejected login attempt must leave any prior session untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/auth/admin/login", self.base_url))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response, status).await;
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let response = self
            .send(self.request(Method::GET, "/api/admin/dashboard/stats"))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn sold_properties(&self) -> Result<SoldPropertiesReport, ApiError> {
        let response = self
            .send(self.request(Method::GET, "/api/admin/dashboard/sold-properties"))
            .await?;
        Ok(response.json().await?)
    }

    // ========================================================================
    // Agents
    // ========================================================================

    pub async fn agents(&self) -> Result<Vec<Agent>, ApiError> {
        let response = self.send(self.request(Method::GET, "/api/admin/agents")).await?;
        Ok(response.json().await?)
    }

    pub async fn agent(&self, id: i64) -> Result<Agent, ApiError> {
        let response = self
            .send(self.request(Method::GET, &format!("/api/admin/agents/{}", id)))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn create_agent(&self, agent: NewAgent) -> Result<Agent, ApiError> {
        let mut form = Form::new()
            .text("username", agent.username)
            .text("password", agent.password)
            .text("fullName", agent.full_name)
            .text("email", agent.email)
            .text("phoneNumber", agent.phone_number);

        if let Some(path) = agent.photo {
            let bytes = tokio::fs::read(&path).await.map_err(|e| ApiError::Api {
                status: 0,
                message: format!("Failed to read photo {}: {}", path.display(), e),
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "photo".to_string());
            form = form.part("photo", Part::bytes(bytes).file_name(file_name));
        }

        let response = self
            .send(self.request(Method::POST, "/api/admin/agents").multipart(form))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn update_agent(
        &self,
        id: i64,
        fields: &serde_json::Value,
    ) -> Result<Agent, ApiError> {
        let response = self
            .send(
                self.request(Method::PUT, &format!("/api/admin/agents/{}", id))
                    .json(fields),
            )
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_agent(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/admin/agents/{}", id)))
            .await?;
        Ok(())
    }

    // ========================================================================
    // Properties
    // ========================================================================

    pub async fn properties(&self, query: &PropertyQuery) -> Result<PropertyPage, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(property_type) = query.property_type {
            params.push(("propertyType", property_type.to_string()));
        }
        if let Some(search) = &query.search {
            params.push(("search", search.clone()));
        }

        let response = self
            .send(self.request(Method::GET, "/api/properties").query(&params))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn property(&self, id: i64) -> Result<PropertyListItem, ApiError> {
        let response = self
            .send(self.request(Method::GET, &format!("/api/properties/{}", id)))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn properties_by_agent(&self, agent_id: i64) -> Result<Vec<PropertyListItem>, ApiError> {
        let response = self
            .send(self.request(Method::GET, &format!("/api/properties/agent/{}", agent_id)))
            .await?;
        Ok(response.json().await?)
    }

    /// Property updates go through the backend's multipart endpoint, fields
    /// as form text parts.
    pub async fn update_property(
        &self,
        id: i64,
        fields: Vec<(String, String)>,
    ) -> Result<PropertyListItem, ApiError> {
        let mut form = Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }

        let response = self
            .send(
                self.request(Method::PUT, &format!("/api/properties/{}", id))
                    .multipart(form),
            )
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete_property(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/api/properties/{}", id)))
            .await?;
        Ok(())
    }

    // ========================================================================
    // Users & inquiries
    // ========================================================================

    pub async fn users(&self) -> Result<Vec<AppUser>, ApiError> {
        let response = self.send(self.request(Method::GET, "/api/admin/users")).await?;
        Ok(response.json().await?)
    }

    pub async fn inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        let response = self.send(self.request(Method::GET, "/api/inquiries")).await?;
        Ok(response.json().await?)
    }

    pub async fn update_inquiry_status(
        &self,
        id: i64,
        status: InquiryStatus,
        admin_response: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut params: Vec<(&str, String)> = vec![("status", status.to_string())];
        if let Some(text) = admin_response {
            params.push(("response", text.to_string()));
        }

        self.send(
            self.request(Method::PUT, &format!("/api/inquiries/{}/status", id))
                .query(&params),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use crate::session::Session;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn client(base_url: &str) -> (ApiClient, TempDir) {
        let dir = TempDir::new().unwrap();
        let session = Arc::new(SessionStore::load(dir.path()));
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        (ApiClient::new(&config, session).unwrap(), dir)
    }

    /// One-shot server answering the next request with a canned response.
    async fn serve_once(response: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let _ = stream.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_401_clears_session_memory_and_disk() {
        let base_url = serve_once(
            "HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let dir = TempDir::new().unwrap();
        let session = Arc::new(SessionStore::load(dir.path()));
        session
            .establish(Session {
                username: "admin".to_string(),
                user_type: UserType::Admin,
                token: "tok-expired".to_string(),
            })
            .unwrap();
        assert!(dir.path().join("propconnect_admin_auth.json").exists());

        let config = ApiConfig {
            base_url,
            timeout_secs: 5,
        };
        let api = ApiClient::new(&config, session.clone()).unwrap();

        let err = api.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!session.is_authenticated());
        assert!(!dir.path().join("propconnect_admin_auth.json").exists());
    }

    #[tokio::test]
    async fn test_non_401_failure_keeps_session() {
        let base_url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let dir = TempDir::new().unwrap();
        let session = Arc::new(SessionStore::load(dir.path()));
        session
            .establish(Session {
                username: "admin".to_string(),
                user_type: UserType::Admin,
                token: "tok-live".to_string(),
            })
            .unwrap();

        let config = ApiConfig {
            base_url,
            timeout_secs: 5,
        };
        let api = ApiClient::new(&config, session.clone()).unwrap();

        let err = api.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 503, .. }));
        assert!(session.is_authenticated());
        assert!(dir.path().join("propconnect_admin_auth.json").exists());
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let (api, _dir) = client("http://localhost:8080/");
        assert_eq!(api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_unauthorized_error_points_at_login() {
        let message = ApiError::Unauthorized.to_string();
        assert!(message.contains("propconnect login"));
    }

    #[test]
    fn test_api_error_carries_status_and_message() {
        let err = ApiError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 503: maintenance");
    }
}
