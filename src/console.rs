//! Operator-facing text. Everything here goes to stdout; diagnostics go
//! through `tracing` to stderr.

use crate::models::AppConfig;
use crate::models::app_config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR};
use crate::models::oauth::preview;

pub fn banner() -> String {
    format!("Google OAuth Refresh Token Generator\n{}", "=".repeat(50))
}

pub fn missing_credentials() -> String {
    format!(
        "Please set {CLIENT_ID_VAR} and {CLIENT_SECRET_VAR}\n\n\
         How to set them:\n\
         export {CLIENT_ID_VAR}=your_client_id\n\
         export {CLIENT_SECRET_VAR}=your_client_secret\n\
         then run this tool again"
    )
}

pub fn client_summary(config: &AppConfig) -> String {
    format!(
        "Client ID: {}...\nRedirect URI: {}",
        preview(config.client_id.as_str(), 20),
        config.redirect_url.as_str()
    )
}

pub fn instructions(auth_url: &str, port: u16) -> String {
    format!(
        "\nAuthorization URL: {auth_url}\n\n\
         Instructions:\n\
         1. Open the URL above (or paste it into a browser)\n\
         2. Sign in to your Google account\n\
         3. Allow access to Google Drive\n\
         4. You will be redirected back to localhost:{port}\n\
         5. The refresh token will be printed in this console"
    )
}

pub fn browser_opened(opened: bool) -> &'static str {
    if opened {
        "\nBrowser opened. If nothing appeared, copy the URL into a browser manually."
    } else {
        "\nCould not open a browser automatically. Please copy the URL into a browser."
    }
}

pub fn waiting(port: u16) -> String {
    format!("\nLocal server listening on port {port}...\nWaiting for authorization code...")
}

pub fn code_received(code: &str) -> String {
    format!("\nReceived authorization code: {}...", preview(code, 20))
}

/// The delivery channel for the credential: the token verbatim plus a line
/// ready to paste into `.env`.
pub fn refresh_token_report(refresh_token: &str) -> String {
    format!(
        "\nGOOGLE REFRESH TOKEN:\n{refresh_token}\n\n\
         Copy this line into your .env file:\n\
         GOOGLE_REFRESH_TOKEN={refresh_token}"
    )
}

pub fn missing_refresh_token() -> &'static str {
    "\nDid not receive a refresh token. Please try again."
}

pub fn exchange_failed() -> &'static str {
    "\nToken exchange failed. Run this tool again to get a fresh authorization code."
}

pub fn timed_out(minutes: u64) -> String {
    format!("\nNo authorization code received within {minutes} minutes. Server stopped.")
}

pub fn stopped() -> &'static str {
    "\nServer stopped"
}
