pub mod app_config;
pub mod oauth;

pub use app_config::AppConfig;
pub use app_config::ConfigError;

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::services::TokenExchanger;
use oauth::FlowOutcome;

#[derive(Clone)]
pub struct AppState {
    pub exchanger: Arc<dyn TokenExchanger>,
    /// Taken by the first request that carries a code; `None` afterwards.
    pub outcome_tx: Arc<Mutex<Option<oneshot::Sender<FlowOutcome>>>>,
}

impl AppState {
    pub fn new(exchanger: Arc<dyn TokenExchanger>) -> (Self, oneshot::Receiver<FlowOutcome>) {
        let (tx, rx) = oneshot::channel();
        let state = Self {
            exchanger,
            outcome_tx: Arc::new(Mutex::new(Some(tx))),
        };
        (state, rx)
    }

    /// Claims the single code slot for this run.
    pub fn claim_outcome_slot(&self) -> Option<oneshot::Sender<FlowOutcome>> {
        match self.outcome_tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}
