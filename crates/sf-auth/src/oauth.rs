//! OAuth 2.0 username-password flow.
//!
//! The token request is a single POST to
//! `<login_url><grant_service>&client_id=..&client_secret=..&username=..&password=..`.
//! A failed exchange is never retried.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use sfauto_client::AccessKeyPair;

use crate::config::ApiSettings;
use crate::credentials::Credential;
use crate::error::{Error, ErrorKind, Result};

/// OAuth client that exchanges a [`Credential`] for an [`AccessKeyPair`].
#[derive(Clone)]
pub struct OAuthClient {
    settings: ApiSettings,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client.
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            settings,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a new OAuth client with a preconfigured reqwest client.
    pub fn with_http_client(settings: ApiSettings, http_client: reqwest::Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    /// Get the API settings.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Build the token URL, credentials included as query parameters.
    pub(crate) fn token_url(&self, credential: &Credential) -> Result<String> {
        let params = serde_urlencoded::to_string([
            ("client_id", credential.client_id()),
            ("client_secret", credential.client_secret()),
            ("username", credential.username()),
            ("password", credential.password()),
        ])?;

        let grant_service = self.settings.grant_service();
        let separator = if grant_service.contains('?') { '&' } else { '?' };

        // Exactly one slash between host and path, whichever side carries it.
        Ok(format!(
            "{}/{}{}{}",
            credential.login_url().trim_end_matches('/'),
            grant_service.trim_start_matches('/'),
            separator,
            params
        ))
    }

    /// Exchange the credential for an access key pair.
    ///
    /// Fails with [`ErrorKind::OAuth`] or [`ErrorKind::Http`] on a non-success
    /// status and with [`ErrorKind::MalformedTokenResponse`] when the body
    /// lacks `instance_url`, `access_token` or `token_type`.
    #[instrument(skip(self, credential), fields(username = %credential.username()))]
    pub async fn authenticate(&self, credential: &Credential) -> Result<AccessKeyPair> {
        let url = self.token_url(credential)?;

        let response = self
            .http_client
            .post(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    status: status.as_u16(),
                    error: error.error,
                    description: error.error_description.unwrap_or_default(),
                }),
                Err(_) => Error::new(ErrorKind::Http(format!(
                    "token endpoint returned {}",
                    status.as_u16()
                ))),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::with_source(
                ErrorKind::MalformedTokenResponse("body is not a token response".into()),
                e,
            )
        })?;

        let keys = token.into_key_pair(&self.settings)?;
        debug!(instance_url = %keys.instance_url(), "Authenticated");
        Ok(keys)
    }
}

/// Authenticate once with fresh defaults for the HTTP client.
pub async fn authenticate(settings: &ApiSettings, credential: &Credential) -> Result<AccessKeyPair> {
    OAuthClient::new(settings.clone())
        .authenticate(credential)
        .await
}

/// Token response from OAuth.
///
/// Every field is optional at the serde level so a partial body is reported
/// as [`ErrorKind::MalformedTokenResponse`] naming the missing field.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub instance_url: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// User identity URL.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("instance_url", &self.instance_url)
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl TokenResponse {
    /// Combine with the API settings into an [`AccessKeyPair`].
    pub fn into_key_pair(self, settings: &ApiSettings) -> Result<AccessKeyPair> {
        fn required(value: Option<String>, field: &str) -> Result<String> {
            value.filter(|v| !v.is_empty()).ok_or_else(|| {
                Error::new(ErrorKind::MalformedTokenResponse(format!(
                    "missing {field}"
                )))
            })
        }

        let instance_url = required(self.instance_url, "instance_url")?;
        let access_token = required(self.access_token, "access_token")?;
        let token_type = required(self.token_type, "token_type")?;

        Ok(AccessKeyPair::new(
            instance_url,
            token_type,
            access_token,
            settings.api_root(),
            settings.api_version(),
        )?)
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
