//! Configuration types shared across the orchestrator and the calendar core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Color assigned to merged days whose summed count has no classification
/// bucket among the primary source's observed counts.
pub const DEFAULT_OVERFLOW_COLOR: &str = "#ff0000";

/// Strategy for issuing the per-source fetches of a graph request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Issue all source fetches at once and await them together.
    #[default]
    Concurrent,
    /// Fetch the primary source first, then each secondary source in order.
    Sequential,
}

/// How merged days are folded into the yearly totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TotalsPolicy {
    /// Add one per merged day to the year's total, regardless of the added count.
    #[default]
    TouchedDays,
    /// Add the secondary source's actual counts for the merged days.
    SummedCounts,
}

/// Where the first week column of a grid is anchored relative to the window start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WeekAnchor {
    /// Advance to the first Sunday on or after the window start.
    ///
    /// Days before that Sunday are not part of the grid.
    #[default]
    Forward,
    /// Step back to the Sunday on or before the window start so the whole window is covered.
    Backward,
}

/// Global configuration for the `Tessera` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseraConfig {
    /// Strategy for fetching from the registered sources.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for the fetch phase of a graph request.
    pub request_timeout: Option<Duration>,
    /// Color tag used for merged counts with no known classification.
    pub overflow_color: String,
    /// How merged days adjust the yearly totals.
    pub totals_policy: TotalsPolicy,
    /// Week anchoring used when projecting grids.
    pub week_anchor: WeekAnchor,
    /// Username used for the primary source when a request does not name one.
    pub default_primary_user: Option<String>,
    /// Username used for the secondary sources when a request does not name one.
    pub default_secondary_user: Option<String>,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            overflow_color: DEFAULT_OVERFLOW_COLOR.to_string(),
            totals_policy: TotalsPolicy::default(),
            week_anchor: WeekAnchor::default(),
            default_primary_user: None,
            default_secondary_user: None,
        }
    }
}
