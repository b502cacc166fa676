#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tessera_core::connector::{CountsProvider, HistoryProvider, TesseraConnector};
use tessera_core::{ContributionHistory, DailyCounts, TesseraError};
use tokio::time::{Duration, sleep};

type HistoryFn = Arc<dyn Fn(&str) -> Result<ContributionHistory, TesseraError> + Send + Sync>;
type CountsFn = Arc<dyn Fn(&str) -> Result<DailyCounts, TesseraError> + Send + Sync>;

/// Simple in-memory connector used by integration tests.
/// Tailor behavior (data, failures, latency, default user) via the fields below.
pub struct MockConnector {
    pub name: &'static str,
    pub history_fn: Option<HistoryFn>,
    pub counts_fn: Option<CountsFn>,
    pub delay_ms: u64,
    pub default_user: Option<String>,
}

impl MockConnector {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            history_fn: None,
            counts_fn: None,
            delay_ms: 0,
            default_user: None,
        }
    }

    /// Primary source answering every user with `history`.
    pub fn primary(name: &'static str, history: ContributionHistory) -> Self {
        Self::new(name).with_history(move |_| Ok(history.clone()))
    }

    /// Secondary source answering every user with `counts`.
    pub fn secondary(name: &'static str, counts: DailyCounts) -> Self {
        Self::new(name).with_counts(move |_| Ok(counts.clone()))
    }

    pub fn with_history<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<ContributionHistory, TesseraError> + Send + Sync + 'static,
    {
        self.history_fn = Some(Arc::new(f));
        self
    }

    pub fn with_counts<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<DailyCounts, TesseraError> + Send + Sync + 'static,
    {
        self.counts_fn = Some(Arc::new(f));
        self
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn default_user(mut self, user: &str) -> Self {
        self.default_user = Some(user.to_string());
        self
    }

    pub fn arc(self) -> Arc<dyn TesseraConnector> {
        Arc::new(self)
    }

    async fn pause(&self) {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl TesseraConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn default_user(&self) -> Option<&str> {
        self.default_user.as_deref()
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.history_fn
            .as_ref()
            .map(|_| self as &dyn HistoryProvider)
    }

    fn as_counts_provider(&self) -> Option<&dyn CountsProvider> {
        self.counts_fn.as_ref().map(|_| self as &dyn CountsProvider)
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
        self.pause().await;
        match &self.history_fn {
            Some(f) => f(user),
            None => Err(TesseraError::unsupported("history")),
        }
    }
}

#[async_trait]
impl CountsProvider for MockConnector {
    async fn daily_counts(&self, user: &str) -> Result<DailyCounts, TesseraError> {
        self.pause().await;
        match &self.counts_fn {
            Some(f) => f(user),
            None => Err(TesseraError::unsupported("daily-counts")),
        }
    }
}
