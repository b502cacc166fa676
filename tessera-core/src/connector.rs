use async_trait::async_trait;

use crate::series::{ContributionHistory, DailyCounts};
use crate::{Capability, TesseraError};
pub use tessera_types::SourceKey;

/// Focused role trait for connectors that provide a classified contribution history.
///
/// This is the role the primary source plays: its records carry the color and
/// intensity tags that merged days are reclassified against.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch the full contribution history of `user`.
    async fn history(&self, user: &str) -> Result<ContributionHistory, TesseraError>;
}

/// Focused role trait for connectors that provide raw per-day counts.
#[async_trait]
pub trait CountsProvider: Send + Sync {
    /// Fetch per-day contribution counts of `user`.
    async fn daily_counts(&self, user: &str) -> Result<DailyCounts, TesseraError>;
}

/// Main connector trait implemented by source crates. Exposes capability discovery.
pub trait TesseraConnector: Send + Sync {
    /// A stable identifier (e.g., "tessera-github", "tessera-gitlab").
    fn name(&self) -> &'static str;

    /// Canonical source key constructed from the static name.
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Username to query when neither the request nor the orchestrator names one.
    fn default_user(&self) -> Option<&str> {
        None
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }

    /// Advertise daily-count capability by returning a usable trait object reference when supported.
    fn as_counts_provider(&self) -> Option<&dyn CountsProvider> {
        None
    }

    /// Whether this connector advertises the given capability.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::History => self.as_history_provider().is_some(),
            Capability::DailyCounts => self.as_counts_provider().is_some(),
            _ => false,
        }
    }
}
