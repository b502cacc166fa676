//! tessera-gitlab
//!
//! Connector that implements `TesseraConnector` on top of GitLab's public
//! activity calendar. It reports raw per-day counts and is meant to be
//! registered as a secondary source.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{GlCalendar, RealAdapter};
use async_trait::async_trait;
pub use builder::{DEFAULT_BASE_URL, GitlabConnectorBuilder};
use tessera_core::{
    DailyCounts, TesseraError,
    connector::{CountsProvider, SourceKey, TesseraConnector},
};

#[cfg(feature = "test-adapters")]
type CalendarAdapter = Arc<dyn GlCalendar>;
#[cfg(not(feature = "test-adapters"))]
type CalendarAdapter = Arc<RealAdapter>;

/// Public connector type. Construct with `GitlabConnector::builder()`.
pub struct GitlabConnector {
    calendar: CalendarAdapter,
    default_user: Option<String>,
}

impl GitlabConnector {
    /// Static connector key.
    pub const KEY: SourceKey = SourceKey::new("tessera-gitlab");

    fn normalize_error(&self, e: TesseraError) -> TesseraError {
        match e {
            TesseraError::Connector { connector: _, msg } | TesseraError::Other(msg) => {
                TesseraError::connector(self.key().as_str(), msg)
            }
            other => other,
        }
    }

    fn from_real(adapter: &RealAdapter, default_user: Option<String>) -> Self {
        Self {
            calendar: Arc::new(adapter.clone()),
            default_user,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(calendar: Arc<dyn GlCalendar>) -> Self {
        Self {
            calendar,
            default_user: None,
        }
    }

    /// Same connector with a different default user.
    #[must_use]
    pub fn with_default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = Some(user.into());
        self
    }
}

#[async_trait]
impl CountsProvider for GitlabConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tessera_gitlab::daily_counts", skip(self))
    )]
    async fn daily_counts(&self, user: &str) -> Result<DailyCounts, TesseraError> {
        let counts = self
            .calendar
            .fetch(user)
            .await
            .map_err(|e| self.normalize_error(e))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(days = counts.len(), "fetched daily counts");
        Ok(counts)
    }
}

impl TesseraConnector for GitlabConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "GitLab"
    }

    fn default_user(&self) -> Option<&str> {
        self.default_user.as_deref()
    }

    fn as_counts_provider(&self) -> Option<&dyn CountsProvider> {
        Some(self as &dyn CountsProvider)
    }
}
