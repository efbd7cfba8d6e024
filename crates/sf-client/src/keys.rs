//! The access key pair produced by authentication.

use crate::error::{Error, ErrorKind, Result};

/// Instance URL, API base URL and token obtained from a successful login.
///
/// An `AccessKeyPair` is immutable: there are no setters, and an expired
/// token is handled by authenticating again and building a new pair.
///
/// ## Security
///
/// The access token is redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKeyPair {
    instance_url: String,
    base_url: String,
    access_token: String,
    token_type: String,
}

impl std::fmt::Debug for AccessKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeyPair")
            .field("instance_url", &self.instance_url)
            .field("base_url", &self.base_url)
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl AccessKeyPair {
    /// Build a key pair from the pieces of a token response and the API settings.
    ///
    /// `base_url` is `instance_url + api_root + "/v" + api_version`.
    pub fn new(
        instance_url: impl Into<String>,
        token_type: impl Into<String>,
        access_token: impl Into<String>,
        api_root: &str,
        api_version: &str,
    ) -> Result<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        let token_type = token_type.into();
        let access_token = access_token.into();

        let parsed = url::Url::parse(&instance_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "instance URL must be http(s): {instance_url}"
            ))));
        }
        if access_token.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "access token is empty".to_string(),
            )));
        }
        if token_type.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "token type is empty".to_string(),
            )));
        }

        let api_root = api_root.trim_end_matches('/');
        let api_root = if api_root.starts_with('/') || api_root.is_empty() {
            api_root.to_string()
        } else {
            format!("/{api_root}")
        };
        let base_url = format!(
            "{}{}/v{}",
            instance_url,
            api_root,
            api_version.trim_start_matches('v')
        );

        Ok(Self {
            instance_url,
            base_url,
            access_token,
            token_type,
        })
    }

    /// The org's instance URL, without a trailing slash.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Versioned REST base, e.g. `https://na1.salesforce.com/services/data/v62.0`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Value of the `Authorization` header: `"<token_type> <access_token>"`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
