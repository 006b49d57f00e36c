mod browser;
mod console;
mod error;
mod handlers;
mod models;
mod server;
mod services;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use error::{AppError, AppResult};
use models::oauth::FlowOutcome;
use models::{AppConfig, AppState, ConfigError};
use server::ListenOutcome;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = run().await;
    report(&result);
    ExitCode::from(exit_status(&result))
}

/// 0 when a refresh token was printed or the operator stopped the run.
fn exit_status(result: &AppResult<ListenOutcome>) -> u8 {
    match result {
        Ok(ListenOutcome::Completed(FlowOutcome::RefreshToken(_))) => 0,
        Ok(ListenOutcome::Interrupted) => 0,
        Ok(_) | Err(_) => 1,
    }
}

fn report(result: &AppResult<ListenOutcome>) {
    match result {
        Ok(ListenOutcome::Interrupted) => println!("{}", console::stopped()),
        Ok(_) => {}
        Err(AppError::Config(ConfigError::PlaceholderCredentials)) => {
            println!("{}", console::missing_credentials())
        }
        Err(e) => {
            error!(error = %e, "refresh token generation failed");
            println!("\nError: {e}");
        }
    }
}

async fn run() -> AppResult<ListenOutcome> {
    use handlers::oauth::authorization_url;
    use services::GoogleTokenClient;

    println!("{}", console::banner());

    let app_config = AppConfig::from_env()?;
    app_config.ensure_credentials()?;

    println!("{}", console::client_summary(&app_config));

    let auth_url = authorization_url(&app_config);
    println!("{}", console::instructions(auth_url.as_str(), app_config.port));

    let opened = browser::open_in_browser(auth_url.as_str());
    println!("{}", console::browser_opened(opened));

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let exchanger = Arc::new(GoogleTokenClient::new(http_client, app_config.clone()));
    let (app_state, outcome_rx) = AppState::new(exchanger);

    let port = app_config.port;
    let listener = server::bind_callback_listener(port).await?;

    info!("listening on http://localhost:{}", port);
    println!("{}", console::waiting(port));

    let outcome = server::serve_until_outcome(
        listener,
        app_state,
        outcome_rx,
        app_config.callback_timeout,
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "could not install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
        },
    )
    .await
    .map_err(AppError::Serve)?;

    if outcome == ListenOutcome::TimedOut {
        let minutes = app_config.callback_timeout.as_secs() / 60;
        println!("{}", console::timed_out(minutes));
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_token_exits_zero() {
        let result = Ok(ListenOutcome::Completed(FlowOutcome::RefreshToken(
            "1//token".to_string(),
        )));
        assert_eq!(exit_status(&result), 0);
    }

    #[test]
    fn operator_interrupt_exits_zero() {
        assert_eq!(exit_status(&Ok(ListenOutcome::Interrupted)), 0);
    }

    #[test]
    fn flow_failures_exit_one() {
        for outcome in [
            ListenOutcome::TimedOut,
            ListenOutcome::Completed(FlowOutcome::MissingRefreshToken),
            ListenOutcome::Completed(FlowOutcome::ExchangeFailed),
        ] {
            assert_eq!(exit_status(&Ok(outcome)), 1);
        }
    }

    #[test]
    fn errors_exit_one() {
        let errors = [
            AppError::Config(ConfigError::PlaceholderCredentials),
            AppError::Bind {
                port: 8080,
                source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
            },
            AppError::Serve(std::io::Error::other("accept failed")),
        ];
        for err in errors {
            assert_eq!(exit_status(&Err(err)), 1);
        }
    }

    #[tokio::test]
    async fn taken_port_fails_run_with_bind_error() {
        let holder = tokio::net::TcpListener::bind("0.0.0.0:0").await.unwrap();
        let port = holder.local_addr().unwrap().port();

        let result = server::bind_callback_listener(port).await.map(|_| ListenOutcome::TimedOut);

        assert!(matches!(result, Err(AppError::Bind { port: p, .. }) if p == port));
        assert_eq!(exit_status(&result), 1);
    }
}
