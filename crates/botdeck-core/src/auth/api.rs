//! Remote auth endpoint contract and its HTTP implementation.
//!
//! The backend exposes `login/`, `register/`, `auth/user/` and `auth/sso/`;
//! login-shaped endpoints answer with `{user, access}`. Failures are split
//! into the three cases the session manager distinguishes: a rejection with
//! an optional human-readable detail, a field-keyed validation map, and
//! transport-level failures.

use std::collections::BTreeMap;

use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::models::User;

/// Failure of a remote auth operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint rejected the request, optionally with a detail message.
    #[error("request rejected")]
    Rejected { detail: Option<String> },
    /// Structured per-field validation errors (registration).
    #[error("validation failed")]
    Validation { fields: BTreeMap<String, String> },
    /// Network or parse failure with no structured detail.
    #[error("transport failure: {0}")]
    Transport(anyhow::Error),
}

impl ApiError {
    /// The first field message of a validation failure, if any.
    pub fn first_field_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { fields } => fields.values().next().map(String::as_str),
            _ => None,
        }
    }
}

/// Successful credential exchange: the principal plus a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthExchange {
    pub user: User,
    pub access: String,
}

/// Registration payload. The wire `username` is derived from the email.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Partial profile update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.avatar_url.is_none()
    }
}

/// The remote auth endpoint as seen by the session manager.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthExchange, ApiError>;
    async fn register(&self, registration: &Registration) -> Result<AuthExchange, ApiError>;
    async fn update_profile(&self, token: &str, update: &ProfileUpdate)
    -> Result<User, ApiError>;
    async fn sso_login(&self, provider_token: &str) -> Result<AuthExchange, ApiError>;
}

/// `reqwest`-backed implementation of [`AuthApi`].
pub struct HttpAuthApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpAuthApi {
    /// Builds a client for the given API base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        // A trailing slash matters for Url::join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| anyhow!("Invalid API base URL {normalized:?}: {e}"))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(anyhow!("Invalid endpoint path {path:?}: {e}")))
    }

    /// POSTs a body to a login-shaped endpoint and maps failures to
    /// `Rejected { detail }` with the server's `detail` field when present.
    async fn exchange(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<AuthExchange, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(anyhow!(e).context("Failed to send auth request")))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                detail: extract_detail(&body),
            });
        }

        response
            .json::<AuthExchange>()
            .await
            .map_err(|e| ApiError::Transport(anyhow!(e).context("Failed to parse auth response")))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthExchange, ApiError> {
        self.exchange(
            "login/",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthExchange, ApiError> {
        let username = registration
            .email
            .split('@')
            .next()
            .unwrap_or(&registration.email);
        let body = serde_json::json!({
            "email": registration.email,
            "password": registration.password,
            "confirm_password": registration.confirm_password,
            "username": username,
            "full_name": registration.full_name,
        });

        let url = self.endpoint("register/")?;
        let response = self.client.post(url).json(&body).send().await.map_err(|e| {
            ApiError::Transport(anyhow!(e).context("Failed to send register request"))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Validation {
                fields: extract_field_errors(&body),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                detail: extract_detail(&body),
            });
        }

        response.json::<AuthExchange>().await.map_err(|e| {
            ApiError::Transport(anyhow!(e).context("Failed to parse register response"))
        })
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let url = self.endpoint("auth/user/")?;
        let response = self
            .client
            .patch(url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(|e| {
                ApiError::Transport(anyhow!(e).context("Failed to send profile update"))
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                detail: extract_detail(&body),
            });
        }

        response.json::<User>().await.map_err(|e| {
            ApiError::Transport(anyhow!(e).context("Failed to parse profile response"))
        })
    }

    async fn sso_login(&self, provider_token: &str) -> Result<AuthExchange, ApiError> {
        self.exchange(
            "auth/sso/",
            serde_json::json!({ "access_token": provider_token }),
        )
        .await
    }
}

/// Pulls the `detail` string out of an error body, if it is JSON with one.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_string)
}

/// Flattens a field-keyed error body into field -> first message.
///
/// Accepts both `{"email": "taken"}` and `{"email": ["taken", "..."]}`.
fn extract_field_errors(body: &str) -> BTreeMap<String, String> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) else {
        return BTreeMap::new();
    };

    map.into_iter()
        .filter_map(|(field, value)| {
            let message = match value {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Array(items) => items.into_iter().find_map(|item| {
                    if let serde_json::Value::String(s) = item {
                        Some(s)
                    } else {
                        None
                    }
                }),
                _ => None,
            };
            message.map(|m| (field, m))
        })
        .collect()
}
