use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::grid::{WeekColumn, WindowMode};
use super::util::month_abbr;

/// Month name to draw above a grid column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLabel {
    /// Zero-based index of the week column.
    pub x: usize,
    /// Short month name, e.g. "Jan".
    pub label: String,
}

/// Label every column whose Sunday falls in a different month than the previous label.
///
/// The month tracker starts at January. A December first column is taken as a
/// continuation and not labeled. Rolling grids ignore their last column, which
/// shifts as the window moves.
#[must_use]
pub fn month_labels(grid: &[WeekColumn], mode: WindowMode) -> Vec<MonthLabel> {
    let columns = match mode {
        WindowMode::Rolling => grid.split_last().map_or(grid, |(_, rest)| rest),
        WindowMode::CalendarYear => grid,
    };

    let mut previous = 1;
    let mut labels = Vec::new();
    for (x, column) in columns.iter().enumerate() {
        let Some(first) = column.first() else {
            continue;
        };
        let month = first.date.month();
        if month == previous {
            continue;
        }
        previous = month;
        if x == 0 && month == 12 {
            continue;
        }
        labels.push(MonthLabel {
            x,
            label: month_abbr(month).to_string(),
        });
    }
    labels
}
