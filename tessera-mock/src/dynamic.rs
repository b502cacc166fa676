use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tessera_core::connector::{CountsProvider, HistoryProvider, TesseraConnector};
use tessera_core::{Capability, ContributionHistory, DailyCounts, TesseraError};

/// Instruction for how a method should behave for a given user.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(TesseraError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, TesseraError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delay(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<String, MockBehavior<ContributionHistory>>,
    counts_rules: HashMap<String, MockBehavior<DailyCounts>>,
    requests: Vec<(Capability, String)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for a specific user.
    pub async fn set_history_behavior(
        &self,
        user: impl Into<String>,
        behavior: MockBehavior<ContributionHistory>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(user.into(), behavior);
    }

    /// Set the behavior for `daily_counts` calls for a specific user.
    pub async fn set_counts_behavior(
        &self,
        user: impl Into<String>,
        behavior: MockBehavior<DailyCounts>,
    ) {
        let mut guard = self.state.lock().await;
        guard.counts_rules.insert(user.into(), behavior);
    }

    /// Return a copy of the request log, in call order.
    pub async fn requests(&self) -> Vec<(Capability, String)> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.counts_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    capabilities: HashSet<Capability>,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector advertising history and daily counts.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TesseraConnector>, DynamicMockController) {
        Self::with_capabilities(name, &[Capability::History, Capability::DailyCounts])
    }

    /// Create a new dynamic mock connector advertising only `capabilities`.
    #[must_use]
    pub fn with_capabilities(
        name: &'static str,
        capabilities: &[Capability],
    ) -> (Arc<dyn TesseraConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            capabilities: capabilities.iter().copied().collect(),
            state,
        });
        (me as Arc<dyn TesseraConnector>, controller)
    }
}

impl TesseraConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.capabilities
            .contains(&Capability::History)
            .then_some(self as &dyn HistoryProvider)
    }

    fn as_counts_provider(&self) -> Option<&dyn CountsProvider> {
        self.capabilities
            .contains(&Capability::DailyCounts)
            .then_some(self as &dyn CountsProvider)
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
        // Snapshot the rule without holding the lock across the behavior.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push((Capability::History, user.to_string()));
            guard.history_rules.get(user).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(TesseraError::not_found(format!("history for {user}"))),
        }
    }
}

#[async_trait]
impl CountsProvider for DynamicMockConnector {
    async fn daily_counts(&self, user: &str) -> Result<DailyCounts, TesseraError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push((Capability::DailyCounts, user.to_string()));
            guard.counts_rules.get(user).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(TesseraError::not_found(format!("daily counts for {user}"))),
        }
    }
}
