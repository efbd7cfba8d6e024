//! API location settings shared by every org.

use crate::error::{Error, ErrorKind, Result};

/// Where the REST API and the token endpoint live on an instance.
///
/// Built once at process start. [`ApiSettings::from_env`] fails eagerly if
/// any setting is missing so nothing touches the network with a partial
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    api_root: String,
    api_version: String,
    grant_service: String,
}

impl ApiSettings {
    /// Environment variable holding the REST root path, e.g. `/services/data`.
    pub const API_ROOT_VAR: &'static str = "REST_ENDPOINT";
    /// Environment variable holding the API version, e.g. `62.0`.
    pub const API_VERSION_VAR: &'static str = "API_VERSION";
    /// Environment variable holding the token path and grant type,
    /// e.g. `/services/oauth2/token?grant_type=password`.
    pub const GRANT_SERVICE_VAR: &'static str = "GRANT_SERVICE";

    /// Create settings, rejecting empty values and malformed versions.
    pub fn new(
        api_root: impl Into<String>,
        api_version: impl Into<String>,
        grant_service: impl Into<String>,
    ) -> Result<Self> {
        let api_root = api_root.into().trim().to_string();
        let api_version = api_version.into().trim().trim_start_matches('v').to_string();
        let grant_service = grant_service.into().trim().to_string();

        if api_root.is_empty() {
            return Err(Error::new(ErrorKind::Config("API root is empty".into())));
        }
        if grant_service.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "grant service path is empty".into(),
            )));
        }
        let valid_version = api_version
            .split_once('.')
            .is_some_and(|(major, minor)| {
                !major.is_empty()
                    && !minor.is_empty()
                    && major.chars().all(|c| c.is_ascii_digit())
                    && minor.chars().all(|c| c.is_ascii_digit())
            });
        if !valid_version {
            return Err(Error::new(ErrorKind::Config(format!(
                "API version must look like 62.0, got {api_version:?}"
            ))));
        }

        Ok(Self {
            api_root,
            api_version,
            grant_service,
        })
    }

    /// Load from `REST_ENDPOINT`, `API_VERSION` and `GRANT_SERVICE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ApiSettings::from_env`], reading through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::new(ErrorKind::EnvVar(name.to_string()))),
        };

        Self::new(
            require(Self::API_ROOT_VAR)?,
            require(Self::API_VERSION_VAR)?,
            require(Self::GRANT_SERVICE_VAR)?,
        )
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn grant_service(&self) -> &str {
        &self.grant_service
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_root: sfauto_client::DEFAULT_API_ROOT.to_string(),
            api_version: sfauto_client::DEFAULT_API_VERSION.to_string(),
            grant_service: crate::DEFAULT_GRANT_SERVICE.to_string(),
        }
    }
}
