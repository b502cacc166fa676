//! Tessera assembles contribution calendar graphs from several activity sources.
//!
//! Overview
//! - One primary source supplies a classified history: per-day records with
//!   color and intensity tags, plus yearly totals.
//! - Any number of secondary sources supply raw per-day counts that are folded
//!   into the primary's days, reusing its classification.
//! - The merged series is projected into Sunday-anchored week columns with
//!   month labels and a total per requested year.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `Concurrent` (default): all sources are fetched at once; lowest latency.
//!   - `Sequential`: primary first, then each secondary in registration order.
//! - Every provider call is bounded by `provider_timeout`; the whole fetch phase
//!   can be bounded by `request_timeout`.
//! - Merged days whose summed count matches no classification bucket get the
//!   overflow color and no intensity.
//! - Yearly totals grow by one per merged day unless `TotalsPolicy::SummedCounts`
//!   is selected.
//! - With `full_year`, the current year is drawn as a trailing-year window
//!   ending today; other years always use January through December.
//!
//! Examples
//! Building an orchestrator over two public sources:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera::Tessera;
//! use tessera_github::GithubConnector;
//! use tessera_gitlab::GitlabConnector;
//!
//! let tessera = Tessera::builder()
//!     .with_primary(Arc::new(GithubConnector::try_new_default()?))
//!     .with_secondary(Arc::new(GitlabConnector::try_new_default()?))
//!     .build()?;
//! ```
//!
//! Requesting graphs:
//! ```rust,ignore
//! let graphs = tessera
//!     .graph()
//!     .years(&[2024, 2023])?
//!     .full_year(true)
//!     .primary_user("octocat")
//!     .secondary_user("octocat")
//!     .run()
//!     .await?;
//! for g in &graphs {
//!     println!("{}: {} contributions in {} weeks", g.year, g.total_count, g.blocks.len());
//! }
//! ```
//!
//! See `tessera/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Tessera, TesseraBuilder};
pub use router::graph::{GraphBuilder, GraphRequest};
pub use router::util::with_request_deadline;

// Re-export core types for convenience
pub use tessera_core::{
    Capability, Cell, Clock, ContributionHistory, ContributionRecord, DailyCounts, DateRange,
    FetchStrategy, FixedClock, Grid, MonthLabel, SystemClock, TesseraConfig, TesseraConnector,
    TesseraError, TotalsPolicy, UnifiedSeries, WeekAnchor, WeekColumn, YearGraphData,
    YearSummary,
};
