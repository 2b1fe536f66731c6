//! reqwest-backed Secrets Manager client.

use async_trait::async_trait;
use bws_common::build_http_client;
use reqwest::{Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    api::{ProjectsApi, SecretsApi, SecretsManagerClient},
    auth::{AccessToken, TokenResponse, login_form},
    config::ClientConfig,
    error::{SdkError, SdkResult},
    models::{DeleteResponse, Project, Secret, SecretCreateRequest, SecretPutRequest},
};

struct BearerToken {
    value: SecretString,
    expires_at: Instant,
}

/// Secrets Manager client authenticating with a machine-account access token.
pub struct HttpClient {
    config: ClientConfig,
    access_token: AccessToken,
    http: Client,
    bearer: RwLock<Option<BearerToken>>,
}

impl HttpClient {
    /// Create a new client. No request is made until [`HttpClient::login`]
    /// or the first API call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, access_token: AccessToken) -> SdkResult<Self> {
        let http = build_http_client(&config.http)?;

        Ok(Self {
            config,
            access_token,
            http,
            bearer: RwLock::new(None),
        })
    }

    /// Exchange the access token for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::AuthenticationFailed`] if the identity server
    /// rejects the credentials.
    #[instrument(skip(self), fields(client_id = %self.access_token.client_id()))]
    pub async fn login(&self) -> SdkResult<()> {
        let url = self.config.identity_endpoint(&["connect", "token"])?;

        let response = self
            .http
            .post(url)
            .form(&login_form(&self.access_token))
            .send()
            .await
            .map_err(|e| SdkError::unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SdkError::auth_failed(format!("Status {status}: {text}")));
        }

        let token: TokenResponse = response.json().await?;
        let ttl = Duration::from_secs(token.expires_in);

        *self.bearer.write().await = Some(BearerToken {
            value: SecretString::from(token.access_token),
            expires_at: Instant::now() + ttl,
        });

        info!(ttl_secs = ttl.as_secs(), "Authenticated with Secrets Manager");
        Ok(())
    }

    async fn bearer_token(&self) -> SdkResult<SecretString> {
        let needs_login = {
            let bearer = self.bearer.read().await;
            bearer.as_ref().is_none_or(|token| {
                token.expires_at.saturating_duration_since(Instant::now()) < self.config.refresh_margin
            })
        };

        if needs_login {
            debug!("Bearer token missing or expiring, logging in");
            self.login().await?;
        }

        self.bearer
            .read()
            .await
            .as_ref()
            .map(|token| token.value.clone())
            .ok_or_else(|| SdkError::auth_failed("No bearer token available"))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> SdkResult<T> {
        let url = self.config.api_endpoint(segments)?;
        let token = self.bearer_token().await?;
        let path = url.path().to_string();

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(token.expose_secret());

        if let Some(b) = body {
            request = request.json(&b);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SdkError::unavailable(e.to_string()))?;

        let response = check_status(&path, response).await?;
        response.json().await.map_err(SdkError::from)
    }
}

async fn check_status(path: &str, response: Response) -> SdkResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text);
    warn!(path, status = status.as_u16(), %message, "Secrets Manager request failed");

    Err(match status.as_u16() {
        401 => SdkError::auth_failed(message),
        403 => SdkError::PermissionDenied(path.to_string()),
        404 => SdkError::not_found(path),
        429 => SdkError::RateLimited,
        code => SdkError::Api {
            status: code,
            message,
        },
    })
}

/// The API wraps failures as `{"message": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ProjectsApi for HttpClient {
    #[instrument(skip(self))]
    async fn create(&self, organization_id: &str, name: &str) -> SdkResult<Project> {
        let body = serde_json::json!({ "name": name });
        self.request(
            Method::POST,
            &["organizations", organization_id, "projects"],
            Some(body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> SdkResult<Project> {
        self.request(Method::GET, &["projects", id], None).await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, organization_id: &str, name: &str) -> SdkResult<Project> {
        let body = serde_json::json!({ "organizationId": organization_id, "name": name });
        self.request(Method::PUT, &["projects", id], Some(body))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse> {
        let body = serde_json::to_value(ids)?;
        self.request(Method::POST, &["projects", "delete"], Some(body))
            .await
    }
}

#[async_trait]
impl SecretsApi for HttpClient {
    #[instrument(skip(self, request), fields(key = %request.key))]
    async fn create(&self, request: &SecretCreateRequest) -> SdkResult<Secret> {
        let body = serde_json::to_value(request)?;
        self.request(
            Method::POST,
            &["organizations", request.organization_id.as_str(), "secrets"],
            Some(body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> SdkResult<Secret> {
        self.request(Method::GET, &["secrets", id], None).await
    }

    #[instrument(skip(self, request), fields(id = %request.id, key = %request.key))]
    async fn update(&self, request: &SecretPutRequest) -> SdkResult<Secret> {
        let body = serde_json::to_value(request)?;
        self.request(Method::PUT, &["secrets", request.id.as_str()], Some(body))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, ids: &[String]) -> SdkResult<DeleteResponse> {
        let body = serde_json::to_value(ids)?;
        self.request(Method::POST, &["secrets", "delete"], Some(body))
            .await
    }
}

impl SecretsManagerClient for HttpClient {
    fn projects(&self) -> &dyn ProjectsApi {
        self
    }

    fn secrets(&self) -> &dyn SecretsApi {
        self
    }
}
