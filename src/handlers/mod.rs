pub mod oauth;

use axum::{Router, routing::get};

use crate::models::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(oauth::callback_handler))
        .with_state(app_state)
}
