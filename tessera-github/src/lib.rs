//! tessera-github
//!
//! Connector that implements `TesseraConnector` on top of a public JSON API
//! serving GitHub contribution calendars. It plays the primary role: its
//! records carry the color and intensity tags other sources are classified by.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;
mod wire;

use std::sync::Arc;

use adapter::{GhCalendar, RealAdapter};
use async_trait::async_trait;
pub use builder::{DEFAULT_BASE_URL, GithubConnectorBuilder};
use tessera_core::{
    ContributionHistory, TesseraError,
    connector::{HistoryProvider, SourceKey, TesseraConnector},
};

#[cfg(feature = "test-adapters")]
type CalendarAdapter = Arc<dyn GhCalendar>;
#[cfg(not(feature = "test-adapters"))]
type CalendarAdapter = Arc<RealAdapter>;

/// Public connector type. Construct with `GithubConnector::builder()`.
pub struct GithubConnector {
    calendar: CalendarAdapter,
    default_user: Option<String>,
}

impl GithubConnector {
    /// Static connector key.
    pub const KEY: SourceKey = SourceKey::new("tessera-github");

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("404")
    }

    fn normalize_error(&self, e: TesseraError, what: &str) -> TesseraError {
        match e {
            TesseraError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    TesseraError::not_found(what.to_string())
                } else {
                    TesseraError::connector(self.key().as_str(), msg)
                }
            }
            TesseraError::Other(msg) => TesseraError::connector(self.key().as_str(), msg),
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
    pub fn from_adapter(calendar: Arc<dyn GhCalendar>) -> Self {
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
impl HistoryProvider for GithubConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tessera_github::history", skip(self))
    )]
    async fn history(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
        let what = format!("contributions for {user}");
        let history = self
            .calendar
            .fetch(user)
            .await
            .map_err(|e| self.normalize_error(e, &what))?;
        history.ensure_unique_dates()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            years = history.years.len(),
            records = history.contributions.len(),
            "fetched contribution history"
        );
        Ok(history)
    }
}

impl TesseraConnector for GithubConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "GitHub"
    }

    fn default_user(&self) -> Option<&str> {
        self.default_user.as_deref()
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}
