use reqwest::Url;

use crate::models::AppConfig;

/// Consent URL for offline access; `prompt=consent` makes Google issue a
/// refresh token even when the app was authorized before.
pub fn authorization_url(config: &AppConfig) -> Url {
    let mut url = config.auth_url.url().clone();

    url.query_pairs_mut()
        .append_pair("client_id", config.client_id.as_str())
        .append_pair("redirect_uri", config.redirect_url.as_str())
        .append_pair("scope", config.scope.as_str())
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");

    url
}
