//! Org login credentials.
//!
//! Secrets are redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};

/// Username/password plus connected-app keys for one org.
///
/// Immutable once built. Construct it explicitly with [`Credential::new`] or
/// load it from `<PREFIX>_*` environment variables with
/// [`Credential::from_env`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    username: String,
    password: String,
    login_url: String,
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Environment variable suffixes read by [`Credential::from_env`].
pub const CREDENTIAL_VARS: [&str; 5] = [
    "USERNAME",
    "PASSWORD",
    "LOGIN_URL",
    "CLIENT_ID",
    "CLIENT_SECRET",
];

impl Credential {
    /// Create a credential, rejecting empty fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        login_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let credential = Self {
            username: username.into(),
            password: password.into(),
            login_url: login_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        };

        for (name, value) in [
            ("username", &credential.username),
            ("password", &credential.password),
            ("login_url", &credential.login_url),
            ("client_id", &credential.client_id),
            ("client_secret", &credential.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::new(ErrorKind::Config(format!("{name} is empty"))));
            }
        }

        url::Url::parse(&credential.login_url).map_err(|e| {
            Error::with_source(
                ErrorKind::Config(format!("login_url is not a valid URL: {e}")),
                e,
            )
        })?;

        Ok(credential)
    }

    /// Load from environment variables `<PREFIX>_USERNAME`, `<PREFIX>_PASSWORD`,
    /// `<PREFIX>_LOGIN_URL`, `<PREFIX>_CLIENT_ID` and `<PREFIX>_CLIENT_SECRET`.
    ///
    /// A missing or empty variable is an [`ErrorKind::EnvVar`] error naming it.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Like [`Credential::from_env`], reading through an arbitrary lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = prefix.trim_end_matches('_');
        let [username, password, login_url, client_id, client_secret] =
            CREDENTIAL_VARS.map(|suffix| {
                let name = format!("{prefix}_{suffix}");
                match lookup(&name) {
                    Some(value) if !value.trim().is_empty() => Ok(value),
                    _ => Err(Error::new(ErrorKind::EnvVar(name))),
                }
            });

        Self::new(username?, password?, login_url?, client_id?, client_secret?)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}
