use std::future::{Future, IntoFuture};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::handlers::router;
use crate::models::AppState;
use crate::models::oauth::FlowOutcome;

/// How the wait for the redirect ended.
#[derive(Debug, PartialEq, Eq)]
pub enum ListenOutcome {
    Completed(FlowOutcome),
    TimedOut,
    Interrupted,
}

/// Binds the callback port on all interfaces.
pub async fn bind_callback_listener(port: u16) -> AppResult<TcpListener> {
    TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| AppError::Bind { port, source })
}

fn completed(received: Result<FlowOutcome, oneshot::error::RecvError>) -> ListenOutcome {
    match received {
        Ok(outcome) => ListenOutcome::Completed(outcome),
        Err(_) => {
            warn!("outcome channel closed without a result");
            ListenOutcome::Completed(FlowOutcome::ExchangeFailed)
        }
    }
}

/// Serves the callback route until the first authorization code has been
/// handled, `timeout` elapses, or `interrupt` resolves. The listener is shut
/// down gracefully in every case so the browser still gets its page.
///
/// A code that arrived before the deadline is always seen through: once its
/// exchange is in flight the timeout no longer applies.
pub async fn serve_until_outcome<I>(
    listener: TcpListener,
    app_state: AppState,
    mut outcome_rx: oneshot::Receiver<FlowOutcome>,
    timeout: Duration,
    interrupt: I,
) -> std::io::Result<ListenOutcome>
where
    I: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<ListenOutcome>();
    let slot = app_state.clone();

    let waiter = tokio::spawn(async move {
        tokio::pin!(interrupt);
        let outcome = tokio::select! {
            received = &mut outcome_rx => completed(received),
            _ = tokio::time::sleep(timeout) => {
                // Closing the slot here means no handler can start an
                // exchange after the deadline.
                if slot.claim_outcome_slot().is_some() {
                    info!(timeout_secs = timeout.as_secs(), "callback wait timed out");
                    ListenOutcome::TimedOut
                } else {
                    info!("deadline reached during token exchange, waiting for its result");
                    tokio::select! {
                        received = &mut outcome_rx => completed(received),
                        _ = &mut interrupt => {
                            info!("interrupted by operator");
                            ListenOutcome::Interrupted
                        }
                    }
                }
            }
            _ = &mut interrupt => {
                info!("interrupted by operator");
                ListenOutcome::Interrupted
            }
        };
        stop_tx.send(outcome).ok();
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let stop = async move {
        let outcome = stop_rx.await.unwrap_or(ListenOutcome::Interrupted);
        shutdown_tx.send(()).ok();
        outcome
    };
    let serve = axum::serve(listener, router(app_state).into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .into_future();

    let (served, outcome) = tokio::join!(serve, stop);
    waiter.abort();
    served?;

    Ok(outcome)
}
