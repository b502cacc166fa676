use std::sync::Arc;
use std::time::Duration;

use tessera_core::connector::TesseraConnector;
use tessera_core::{
    Capability, Clock, FetchStrategy, SystemClock, TesseraConfig, TesseraError, TotalsPolicy,
    WeekAnchor,
};

/// Orchestrator that fetches from the registered sources and assembles year graphs.
pub struct Tessera {
    pub(crate) primary: Arc<dyn TesseraConnector>,
    pub(crate) secondaries: Vec<Arc<dyn TesseraConnector>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: TesseraConfig,
}

/// Builder for constructing a `Tessera` orchestrator with custom configuration.
pub struct TesseraBuilder {
    primary: Option<Arc<dyn TesseraConnector>>,
    secondaries: Vec<Arc<dyn TesseraConnector>>,
    clock: Option<Arc<dyn Clock>>,
    cfg: TesseraConfig,
}

impl Default for TesseraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseraBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no sources; register a primary via [`Self::with_primary`].
    /// Defaults: concurrent fetches, 5s provider timeout, no request deadline,
    /// forward week anchoring, touched-days totals, and the host's local clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: None,
            secondaries: vec![],
            clock: None,
            cfg: TesseraConfig::default(),
        }
    }

    /// Register the primary source. Its history supplies records, yearly totals,
    /// and the classification merged days are matched against.
    ///
    /// Registering again replaces the previous primary.
    #[must_use]
    pub fn with_primary(mut self, c: Arc<dyn TesseraConnector>) -> Self {
        self.primary = Some(c);
        self
    }

    /// Register a secondary source whose per-day counts are folded into the primary.
    ///
    /// Secondaries are merged in registration order. A connector without daily
    /// counts is used through its history, reduced to counts.
    #[must_use]
    pub fn with_secondary(mut self, c: Arc<dyn TesseraConnector>) -> Self {
        self.secondaries.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TesseraConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Source of "today" for rolling windows and the current-year check.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Issue source fetches concurrently (default) or one after another.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound the whole fetch phase of a graph request.
    ///
    /// When exceeded, returns a `RequestTimeout` error for `graph-data`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Color given to merged days whose count matches no classification bucket.
    #[must_use]
    pub fn overflow_color(mut self, color: impl Into<String>) -> Self {
        self.cfg.overflow_color = color.into();
        self
    }

    /// How merged days adjust the yearly totals.
    #[must_use]
    pub const fn totals_policy(mut self, policy: TotalsPolicy) -> Self {
        self.cfg.totals_policy = policy;
        self
    }

    /// Where the first week column of each grid starts.
    #[must_use]
    pub const fn week_anchor(mut self, anchor: WeekAnchor) -> Self {
        self.cfg.week_anchor = anchor;
        self
    }

    /// Username for the primary source when a request names none.
    #[must_use]
    pub fn default_primary_user(mut self, user: impl Into<String>) -> Self {
        self.cfg.default_primary_user = Some(user.into());
        self
    }

    /// Username for the secondary sources when a request names none.
    #[must_use]
    pub fn default_secondary_user(mut self, user: impl Into<String>) -> Self {
        self.cfg.default_secondary_user = Some(user.into());
        self
    }

    /// Build the `Tessera` orchestrator.
    ///
    /// # Errors
    /// - `InvalidArg` if no primary source was registered.
    /// - `Unsupported` if the primary cannot provide history, or a secondary
    ///   provides neither daily counts nor history.
    pub fn build(self) -> Result<Tessera, TesseraError> {
        let primary = self.primary.ok_or_else(|| {
            TesseraError::InvalidArg(
                "no primary source registered; add one via with_primary(...)".to_string(),
            )
        })?;
        if !primary.supports(Capability::History) {
            return Err(TesseraError::unsupported(format!(
                "{} via {}",
                Capability::History,
                primary.name()
            )));
        }
        if let Some(bad) = self.secondaries.iter().find(|c| {
            !c.supports(Capability::DailyCounts) && !c.supports(Capability::History)
        }) {
            return Err(TesseraError::unsupported(format!(
                "{} via {}",
                Capability::DailyCounts,
                bad.name()
            )));
        }

        Ok(Tessera {
            primary,
            secondaries: self.secondaries,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::default())),
            cfg: self.cfg,
        })
    }
}

impl Tessera {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TesseraError>
    where
        Fut: core::future::Future<Output = Result<T, TesseraError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TesseraError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Tessera` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tessera_github::GithubConnector;
    /// use tessera_gitlab::GitlabConnector;
    ///
    /// let gh = Arc::new(GithubConnector::builder().default_user("octocat").build()?);
    /// let gl = Arc::new(GitlabConnector::builder().build()?);
    ///
    /// let tessera = tessera::Tessera::builder()
    ///     .with_primary(gh)
    ///     .with_secondary(gl)
    ///     .default_secondary_user("octocat")
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TesseraBuilder {
        TesseraBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TesseraConfig {
        &self.cfg
    }

    /// The registered primary source.
    #[must_use]
    pub fn primary(&self) -> &Arc<dyn TesseraConnector> {
        &self.primary
    }

    /// The registered secondary sources, in merge order.
    #[must_use]
    pub fn secondaries(&self) -> &[Arc<dyn TesseraConnector>] {
        &self.secondaries
    }

    /// Current day according to the configured clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}
