use std::collections::HashSet;

use futures::future::{try_join, try_join_all};
use tessera_core::connector::TesseraConnector;
use tessera_core::{
    Capability, ContributionHistory, DailyCounts, FetchStrategy, MergeOptions, TesseraError,
    UnifiedSeries, YearGraphData, build_year_graphs, merge_all,
};

use crate::Tessera;
use crate::router::util::with_request_deadline;

/// Parameters of a graph request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRequest {
    /// Use the trailing-year window for the current year.
    pub full_year: bool,
    /// Account queried on the primary source.
    pub primary_user: Option<String>,
    /// Account queried on the secondary sources.
    pub secondary_user: Option<String>,
    /// Years to graph, in output order.
    pub years: Vec<i32>,
}

impl GraphRequest {
    /// Request for `years`, calendar windows, and configured default users.
    #[must_use]
    pub fn new(years: impl Into<Vec<i32>>) -> Self {
        Self {
            years: years.into(),
            ..Self::default()
        }
    }
}

/// Pick the request's username, else the orchestrator default, else the connector default.
fn resolve_user<'a>(
    requested: Option<&'a str>,
    configured: Option<&'a str>,
    connector: &'a dyn TesseraConnector,
) -> Result<Option<&'a str>, TesseraError> {
    match requested
        .or(configured)
        .or_else(|| connector.default_user())
    {
        Some(user) if user.trim().is_empty() => Err(TesseraError::InvalidArg(format!(
            "empty username for {}",
            connector.name()
        ))),
        other => Ok(other),
    }
}

impl Tessera {
    /// Start a fluent graph request.
    #[must_use]
    pub const fn graph(&self) -> GraphBuilder<'_> {
        GraphBuilder::new(self)
    }

    /// Fetch every source, merge, and assemble one graph per requested year.
    ///
    /// Behavior:
    /// - Usernames come from the request, else the configured defaults, else the
    ///   connector's own default. Without a primary user the primary series is
    ///   empty; secondaries without a user are skipped.
    /// - Fetch errors are returned unchanged; there is no partial result.
    /// - Rolling windows apply to the clock's current year when `full_year` is set.
    ///
    /// # Errors
    /// - `DataUnavailable` when the merged series carries no yearly summaries.
    /// - `InvalidArg` for empty usernames or out-of-range years.
    /// - Any error from the sources, `ProviderTimeout`, or `RequestTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera::graph_data",
            skip(self, req),
            fields(years = ?req.years, full_year = req.full_year),
        )
    )]
    pub async fn graph_data(&self, req: &GraphRequest) -> Result<Vec<YearGraphData>, TesseraError> {
        let series = self.merged_series(req).await?;
        build_year_graphs(
            &series,
            &req.years,
            req.full_year,
            self.cfg.week_anchor,
            self.clock.as_ref(),
        )
    }

    /// Fetch every source for `req` and fold the secondaries into the primary.
    ///
    /// # Errors
    /// Same fetch-phase errors as [`Tessera::graph_data`].
    pub async fn merged_series(&self, req: &GraphRequest) -> Result<UnifiedSeries, TesseraError> {
        let primary_user = resolve_user(
            req.primary_user.as_deref(),
            self.cfg.default_primary_user.as_deref(),
            self.primary.as_ref(),
        )?;

        let mut jobs: Vec<(&dyn TesseraConnector, &str)> = Vec::new();
        for c in &self.secondaries {
            match resolve_user(
                req.secondary_user.as_deref(),
                self.cfg.default_secondary_user.as_deref(),
                c.as_ref(),
            )? {
                Some(user) => jobs.push((c.as_ref(), user)),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), "no username; skipping secondary");
                }
            }
        }

        let fetch = async {
            let primary = self.fetch_history(primary_user);
            let secondaries = jobs.iter().map(|(c, user)| self.fetch_counts(*c, user));
            match self.cfg.fetch_strategy {
                FetchStrategy::Sequential => {
                    let history = primary.await?;
                    let mut counts = Vec::with_capacity(jobs.len());
                    for fut in secondaries {
                        counts.push(fut.await?);
                    }
                    Ok::<_, TesseraError>((history, counts))
                }
                _ => try_join(primary, try_join_all(secondaries)).await,
            }
        };
        let (history, counts) =
            with_request_deadline(Capability::GraphData, self.cfg.request_timeout, fetch).await??;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            records = history.contributions.len(),
            secondaries = counts.len(),
            "merging sources"
        );
        Ok(merge_all(
            history,
            &counts,
            &MergeOptions::from_config(&self.cfg),
        ))
    }

    async fn fetch_history(&self, user: Option<&str>) -> Result<ContributionHistory, TesseraError> {
        let Some(user) = user else {
            return Ok(ContributionHistory::default());
        };
        let hp = self
            .primary
            .as_history_provider()
            .ok_or_else(|| TesseraError::unsupported(Capability::History.to_string()))?;
        Self::provider_call_with_timeout(
            self.primary.name(),
            Capability::History.as_str(),
            self.cfg.provider_timeout,
            hp.history(user),
        )
        .await
    }

    async fn fetch_counts(
        &self,
        c: &dyn TesseraConnector,
        user: &str,
    ) -> Result<DailyCounts, TesseraError> {
        if let Some(cp) = c.as_counts_provider() {
            return Self::provider_call_with_timeout(
                c.name(),
                Capability::DailyCounts.as_str(),
                self.cfg.provider_timeout,
                cp.daily_counts(user),
            )
            .await;
        }
        let hp = c
            .as_history_provider()
            .ok_or_else(|| TesseraError::unsupported(Capability::DailyCounts.to_string()))?;
        let history = Self::provider_call_with_timeout(
            c.name(),
            Capability::History.as_str(),
            self.cfg.provider_timeout,
            hp.history(user),
        )
        .await?;
        Ok(history.daily_counts())
    }
}

/// Builder to assemble and run a graph request.
pub struct GraphBuilder<'a> {
    pub(crate) tessera: &'a Tessera,
    pub(crate) req: GraphRequest,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new builder bound to a `Tessera` instance, with no years selected.
    #[must_use]
    pub const fn new(tessera: &'a Tessera) -> Self {
        Self {
            tessera,
            req: GraphRequest {
                full_year: false,
                primary_user: None,
                secondary_user: None,
                years: Vec::new(),
            },
        }
    }

    /// Replace the list of years.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty list or a repeated year.
    pub fn years(mut self, years: &[i32]) -> Result<Self, TesseraError> {
        if years.is_empty() {
            return Err(TesseraError::InvalidArg(
                "at least one year is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for &year in years {
            if !seen.insert(year) {
                return Err(TesseraError::InvalidArg(format!(
                    "duplicate year {year} in years list"
                )));
            }
        }
        self.req.years = years.to_vec();
        Ok(self)
    }

    /// Append a single year.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the year is already selected.
    pub fn add_year(mut self, year: i32) -> Result<Self, TesseraError> {
        if self.req.years.contains(&year) {
            return Err(TesseraError::InvalidArg(format!(
                "duplicate year {year} already exists in years list"
            )));
        }
        self.req.years.push(year);
        Ok(self)
    }

    /// Use the trailing-year window for the current year.
    #[must_use]
    pub const fn full_year(mut self, yes: bool) -> Self {
        self.req.full_year = yes;
        self
    }

    /// Account queried on the primary source.
    #[must_use]
    pub fn primary_user(mut self, user: impl Into<String>) -> Self {
        self.req.primary_user = Some(user.into());
        self
    }

    /// Account queried on the secondary sources.
    #[must_use]
    pub fn secondary_user(mut self, user: impl Into<String>) -> Self {
        self.req.secondary_user = Some(user.into());
        self
    }

    /// The request assembled so far.
    #[must_use]
    pub const fn request(&self) -> &GraphRequest {
        &self.req
    }

    /// Execute the request.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no year was selected, otherwise the errors of
    /// [`Tessera::graph_data`].
    pub async fn run(self) -> Result<Vec<YearGraphData>, TesseraError> {
        if self.req.years.is_empty() {
            return Err(TesseraError::InvalidArg("no years requested".to_string()));
        }
        self.tessera.graph_data(&self.req).await
    }
}
