use serde::Deserialize;
use serde_json::{Map, Value};

/// Query string of the provider's redirect to `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Token endpoint JSON body. Only `refresh_token` is read; the rest is kept
/// as-is for diagnostics.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(pub Map<String, Value>);

impl TokenResponse {
    pub fn refresh_token(&self) -> Option<&str> {
        self.0
            .get("refresh_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

/// What happened to the one authorization code this run accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    RefreshToken(String),
    MissingRefreshToken,
    ExchangeFailed,
}

/// First `n` characters of a secret, for previews in logs and pages.
pub fn preview(secret: &str, n: usize) -> &str {
    match secret.char_indices().nth(n) {
        Some((idx, _)) => &secret[..idx],
        None => secret,
    }
}
