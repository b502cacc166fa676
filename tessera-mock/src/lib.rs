//! tessera-mock
//!
//! Connectors for tests and demos that never touch the network.
//!
//! - [`MockConnector`] serves deterministic fixture data for a few well-known users.
//! - [`DynamicMockConnector`] defers every call to rules set through a controller.
use std::time::Duration;

use async_trait::async_trait;
use tessera_core::connector::{CountsProvider, HistoryProvider, TesseraConnector};
use tessera_core::{ContributionHistory, DailyCounts, TesseraError};

pub mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
///
/// Known users: `octocat` (history and counts), `torvalds` (history only),
/// `jdoe` (counts only) and `EMPTY` (empty data). `FAIL` errors and `TIMEOUT`
/// answers after a short delay; anyone else is not found.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Delay applied to the `TIMEOUT` user.
    pub const LATENCY: Duration = Duration::from_millis(200);

    fn not_found(what: &str) -> TesseraError {
        TesseraError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(
        user: &str,
        capability: &'static str,
    ) -> Result<(), TesseraError> {
        match user {
            "FAIL" => Err(TesseraError::connector(
                "tessera-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(Self::LATENCY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl TesseraConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tessera-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_counts_provider(&self) -> Option<&dyn CountsProvider> {
        Some(self as &dyn CountsProvider)
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
        Self::maybe_fail_or_timeout(user, "history").await?;
        let key = if user == "TIMEOUT" { "octocat" } else { user };
        fixtures::history::by_user(key)
            .ok_or_else(|| Self::not_found(&format!("history for {user}")))
    }
}

#[async_trait]
impl CountsProvider for MockConnector {
    async fn daily_counts(&self, user: &str) -> Result<DailyCounts, TesseraError> {
        Self::maybe_fail_or_timeout(user, "daily-counts").await?;
        let key = if user == "TIMEOUT" { "octocat" } else { user };
        fixtures::counts::by_user(key)
            .ok_or_else(|| Self::not_found(&format!("daily counts for {user}")))
    }
}
