use thiserror::Error;

use crate::models::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not bind callback listener on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("callback server error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type AppResult<T> = Result<T, AppError>;
