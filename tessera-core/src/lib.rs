//! tessera-core
//!
//! Core types, traits, and utilities shared across the tessera ecosystem.
//!
//! - `series`: contribution records, yearly summaries, and raw daily counts.
//! - `connector`: the `TesseraConnector` trait and its role traits.
//! - `calendar`: merging sources and projecting them into week-by-day grids.
//! - `clock`: the injectable source of "today".
//!
//! Everything in `calendar` is pure and synchronous; the only async surface
//! is the connector role traits, which assume a Tokio 1.x runtime in the
//! connector crates that implement them.
#![warn(missing_docs)]

/// Merge, grid projection, month labels, and yearly aggregation.
pub mod calendar;
/// Clock capability used for rolling windows.
pub mod clock;
/// Connector capability traits and the primary `TesseraConnector` interface.
pub mod connector;
/// Input data model delivered by contribution sources.
pub mod series;
pub mod types;

pub use calendar::aggregate::{YearGraphData, build_year_graph, build_year_graphs, total_for_year};
pub use calendar::grid::{Cell, Grid, WeekColumn, Window, WindowMode, project_grid};
pub use calendar::labels::{MonthLabel, month_labels};
pub use calendar::merge::{MergeOptions, merge_all, merge_contributions};
pub use calendar::util::{ISO_DATE_FORMAT, month_abbr, parse_iso_date};
pub use clock::{Clock, FixedClock, SystemClock};
pub use connector::TesseraConnector;
pub use series::{
    ContributionHistory, ContributionRecord, DailyCounts, DateRange, UnifiedSeries, YearSummary,
};
pub use types::*;
