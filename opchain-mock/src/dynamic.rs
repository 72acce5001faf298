use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use opchain_core::{OpchainError, OptionChainSnapshot, OptionChainSource};

/// Instruction for how a call should behave for a given symbol.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(OpchainError),
    /// Hang indefinitely (simulate a stalled provider).
    Hang,
}

#[derive(Default)]
struct InternalState {
    chain_rules: HashMap<String, MockBehavior<OptionChainSnapshot>>,
    calls: HashMap<String, usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `option_chain` calls for a specific symbol.
    pub async fn set_chain_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<OptionChainSnapshot>,
    ) {
        let mut guard = self.state.lock().await;
        guard.chain_rules.insert(symbol.into(), behavior);
    }

    /// Number of `option_chain` calls seen for `symbol`.
    pub async fn calls(&self, symbol: &str) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(symbol).copied().unwrap_or(0)
    }
}

/// Chain source whose answers are scripted per symbol; unscripted symbols are not found.
pub struct DynamicMockSource {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a source and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        (
            Arc::new(Self {
                state: Arc::clone(&state),
            }),
            DynamicMockController { state },
        )
    }
}

#[async_trait]
impl OptionChainSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        "opchain-mock-dynamic"
    }

    async fn option_chain(&self, symbol: &str) -> Result<OptionChainSnapshot, OpchainError> {
        let rule = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(symbol.to_string()).or_insert(0) += 1;
            guard.chain_rules.get(symbol).cloned()
        };
        match rule {
            Some(MockBehavior::Return(chain)) => Ok(chain),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(OpchainError::not_found(format!("option chain for {symbol}"))),
        }
    }
}
