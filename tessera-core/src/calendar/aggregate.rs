use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Window, WindowMode, project_grid};
use super::labels::{MonthLabel, month_labels};
use crate::clock::Clock;
use crate::series::ContributionHistory;
use crate::{TesseraError, WeekAnchor};

/// Everything a renderer needs to draw one year's calendar graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGraphData {
    /// Requested year.
    pub year: i32,
    /// Week columns of day cells.
    pub blocks: Grid,
    /// Labels for month changes along the columns.
    pub month_labels: Vec<MonthLabel>,
    /// Contributions counted for the year or the rolling window.
    pub total_count: u64,
}

/// Total contributions shown for `year`.
///
/// Calendar years read the matching yearly summary (0 when absent).
///
/// Rolling windows sum the records from the one dated a year before `today`
/// (or the oldest record when that day is missing) up to, but excluding, the
/// record dated `today`. Without a record for `today` the total is 0.
#[must_use]
pub fn total_for_year(
    year: i32,
    series: &ContributionHistory,
    mode: WindowMode,
    today: NaiveDate,
) -> u64 {
    match mode {
        WindowMode::CalendarYear => series.year_summary(year).map_or(0, |s| s.total),
        WindowMode::Rolling => {
            let Some(end) = series.position(today) else {
                return 0;
            };
            let start = today
                .checked_sub_months(Months::new(12))
                .and_then(|d| series.position(d))
                .unwrap_or(0);
            series
                .contributions
                .get(start..end)
                .map_or(0, |slice| slice.iter().map(|r| u64::from(r.count)).sum())
        }
    }
}

/// Assemble grid, month labels, and total for a single year.
///
/// # Errors
/// Returns `InvalidArg` when the window for `year` is out of range.
pub fn build_year_graph(
    series: &ContributionHistory,
    year: i32,
    mode: WindowMode,
    today: NaiveDate,
    anchor: WeekAnchor,
) -> Result<YearGraphData, TesseraError> {
    let window = Window::for_mode(mode, year, today)?;
    let blocks = project_grid(series, window, anchor);
    let labels = month_labels(&blocks, mode);
    let total_count = total_for_year(year, series, mode, today);
    Ok(YearGraphData {
        year,
        blocks,
        month_labels: labels,
        total_count,
    })
}

/// Assemble one graph per requested year, in request order.
///
/// Rolling windows apply only to the current year and only when `full_year` is set.
///
/// # Errors
/// - `DataUnavailable` when `series` carries no yearly summaries.
/// - `InvalidArg` when a requested year is out of range.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "tessera_core::build_year_graphs",
        skip(series, clock),
        fields(records = series.contributions.len()),
    )
)]
pub fn build_year_graphs(
    series: &ContributionHistory,
    years: &[i32],
    full_year: bool,
    anchor: WeekAnchor,
    clock: &dyn Clock,
) -> Result<Vec<YearGraphData>, TesseraError> {
    if series.years.is_empty() {
        return Err(TesseraError::DataUnavailable);
    }
    let today = clock.today();
    years
        .iter()
        .map(|&year| {
            let mode = WindowMode::for_request(full_year, year, today);
            build_year_graph(series, year, mode, today, anchor)
        })
        .collect()
}
