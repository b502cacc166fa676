use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with the connector role traits and give a
/// consistent Display form in error messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Full classified contribution history (per-day records plus yearly summaries).
    History,
    /// Raw per-day contribution counts without classification.
    DailyCounts,
    /// Assembly of per-year calendar graphs from merged data.
    GraphData,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::DailyCounts => "daily-counts",
            Self::GraphData => "graph-data",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
