use crate::console;
use crate::handlers::oauth::pages;
use crate::models::AppState;
use crate::models::oauth::{CallbackParams, FlowOutcome, preview};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use oauth2::AuthorizationCode;
use tracing::{info, warn};

pub async fn callback_handler(
    Query(params): Query<CallbackParams>,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    let code = match params.code.filter(|code| !code.is_empty()) {
        Some(code) => code,
        None => {
            match params.error.as_deref() {
                Some(provider_error) => {
                    warn!(provider_error, "callback carried an error instead of a code")
                }
                None => info!("callback without authorization code, still waiting"),
            }
            return Html(pages::missing_code_page(params.error.as_deref()));
        }
    };

    let Some(outcome_tx) = app_state.claim_outcome_slot() else {
        warn!("authorization code already processed, ignoring another one");
        return Html(pages::already_processed_page());
    };

    info!(code_preview = preview(&code, 20), "authorization code received");
    println!("{}", console::code_received(&code));

    let code = AuthorizationCode::new(code);
    let (outcome, page) = match app_state.exchanger.exchange_code(&code).await {
        Ok(tokens) => match tokens.refresh_token() {
            Some(refresh_token) => {
                println!("{}", console::refresh_token_report(refresh_token));
                (
                    FlowOutcome::RefreshToken(refresh_token.to_string()),
                    pages::success_page(preview(refresh_token, 20)),
                )
            }
            None => {
                warn!(fields = ?tokens.field_names(), "token response has no refresh_token");
                println!("{}", console::missing_refresh_token());
                (
                    FlowOutcome::MissingRefreshToken,
                    pages::missing_refresh_token_page(),
                )
            }
        },
        Err(_) => {
            println!("{}", console::exchange_failed());
            (FlowOutcome::ExchangeFailed, pages::exchange_failed_page())
        }
    };

    if outcome_tx.send(outcome).is_err() {
        warn!("listener stopped before the outcome was delivered");
    }

    Html(page)
}
