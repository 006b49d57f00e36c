use async_trait::async_trait;
use oauth2::AuthorizationCode;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

use crate::models::AppConfig;
use crate::models::oauth::TokenResponse;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid token response: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<TokenResponse, ExchangeError>;
}

/// Posts the authorization code to Google's token endpoint.
pub struct GoogleTokenClient {
    client: Client,
    config: AppConfig,
}

impl GoogleTokenClient {
    pub fn new(client: Client, config: AppConfig) -> Self {
        Self { client, config }
    }

    async fn request_tokens(
        &self,
        code: &AuthorizationCode,
    ) -> Result<TokenResponse, ExchangeError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.secret().as_str()),
            ("code", code.secret().as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        let response = self
            .client
            .post(self.config.token_url.as_str())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TokenExchanger for GoogleTokenClient {
    async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<TokenResponse, ExchangeError> {
        match self.request_tokens(code).await {
            Ok(tokens) => {
                info!(fields = ?tokens.field_names(), "token exchange successful");
                Ok(tokens)
            }
            Err(e) => {
                error!(error = %e, "token exchange failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "GOOGLE_CLIENT_ID" => Some("client-id.apps.googleusercontent.com".to_string()),
            "GOOGLE_CLIENT_SECRET" => Some("GOCSPX-test-secret".to_string()),
            _ => None,
        })
        .unwrap()
        .with_token_url(&server.url("/token"))
        .unwrap()
    }

    #[tokio::test]
    async fn posts_code_with_fixed_client_parameters() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .x_www_form_urlencoded_tuple(
                        "client_id",
                        "client-id.apps.googleusercontent.com",
                    )
                    .x_www_form_urlencoded_tuple("client_secret", "GOCSPX-test-secret")
                    .x_www_form_urlencoded_tuple("code", "ABC")
                    .x_www_form_urlencoded_tuple("grant_type", "authorization_code")
                    .x_www_form_urlencoded_tuple("redirect_uri", "http://localhost:8080");
                then.status(200).json_body(json!({
                    "access_token": "ya29.access",
                    "expires_in": 3599,
                    "refresh_token": "1//refresh-token",
                    "token_type": "Bearer"
                }));
            })
            .await;

        let exchanger = GoogleTokenClient::new(Client::new(), config_for(&server));
        let tokens = exchanger
            .exchange_code(&AuthorizationCode::new("ABC".to_string()))
            .await
            .expect("exchange should succeed");

        token_mock.assert_async().await;
        assert_eq!(tokens.refresh_token(), Some("1//refresh-token"));
    }

    #[tokio::test]
    async fn http_error_is_reported_with_body() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(400).json_body(json!({
                    "error": "invalid_grant",
                    "error_description": "Bad Request"
                }));
            })
            .await;

        let exchanger = GoogleTokenClient::new(Client::new(), config_for(&server));
        let err = exchanger
            .exchange_code(&AuthorizationCode::new("expired".to_string()))
            .await
            .expect_err("400 should surface as an error");

        token_mock.assert_async().await;
        match err {
            ExchangeError::Status { status, body } => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let exchanger = GoogleTokenClient::new(Client::new(), config_for(&server));
        let err = exchanger
            .exchange_code(&AuthorizationCode::new("ABC".to_string()))
            .await
            .expect_err("html body should not parse");

        assert!(matches!(err, ExchangeError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn transport_error_is_reported() {
        let config = AppConfig::from_lookup(|_| None)
            .unwrap()
            .with_token_url("http://127.0.0.1:1/token")
            .unwrap();

        let exchanger = GoogleTokenClient::new(Client::new(), config);
        let err = exchanger
            .exchange_code(&AuthorizationCode::new("ABC".to_string()))
            .await
            .expect_err("nothing listens on port 1");

        assert!(matches!(err, ExchangeError::Request(_)));
    }
}
