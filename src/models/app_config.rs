use std::time::Duration;

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, Scope, TokenUrl};
use thiserror::Error;

pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";

// Bundled fallbacks. Left as placeholders so a fresh checkout refuses to run
// until real credentials are exported.
pub const DEFAULT_CLIENT_ID: &str = "YOUR_GOOGLE_CLIENT_ID";
pub const DEFAULT_CLIENT_SECRET: &str = "YOUR_GOOGLE_CLIENT_SECRET";

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
pub const REDIRECT_PORT: u16 = 8080;
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET must be set")]
    PlaceholderCredentials,
    #[error("invalid endpoint URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: oauth2::url::ParseError,
    },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_url: RedirectUrl,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub scope: Scope,
    pub port: u16,
    pub callback_timeout: Duration,
}

impl AppConfig {
    /// Reads credentials from the process environment, after loading `.env`
    /// when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(CLIENT_ID_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        let client_secret = lookup(CLIENT_SECRET_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_SECRET.to_string());

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            redirect_url: parse_url(
                &format!("http://localhost:{REDIRECT_PORT}"),
                RedirectUrl::new,
            )?,
            auth_url: parse_url(AUTH_URL, AuthUrl::new)?,
            token_url: parse_url(TOKEN_URL, TokenUrl::new)?,
            scope: Scope::new(DRIVE_FILE_SCOPE.to_string()),
            port: REDIRECT_PORT,
            callback_timeout: CALLBACK_TIMEOUT,
        })
    }

    /// Fails when either credential is still the bundled placeholder.
    pub fn ensure_credentials(&self) -> Result<(), ConfigError> {
        if self.client_id.as_str() == DEFAULT_CLIENT_ID
            || self.client_secret.secret() == DEFAULT_CLIENT_SECRET
        {
            return Err(ConfigError::PlaceholderCredentials);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn with_token_url(mut self, token_url: &str) -> Result<Self, ConfigError> {
        self.token_url = parse_url(token_url, TokenUrl::new)?;
        Ok(self)
    }
}

fn parse_url<T>(
    url: &str,
    ctor: fn(String) -> Result<T, oauth2::url::ParseError>,
) -> Result<T, ConfigError> {
    ctor(url.to_string()).map_err(|source| ConfigError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
