use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::series::{ContributionHistory, ContributionRecord};
use crate::{TesseraError, WeekAnchor};

/// One day of a grid, with the record reported for it if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Calendar day of the cell.
    pub date: NaiveDate,
    /// Record for the day; absent when no source reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ContributionRecord>,
}

/// Up to seven consecutive days starting on a Sunday.
pub type WeekColumn = Vec<Cell>;

/// Week columns in chronological order.
pub type Grid = Vec<WeekColumn>;

/// How the days of a graph are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// January 1 through December 31 of the year.
    CalendarYear,
    /// The 365 days before today, plus today.
    Rolling,
}

impl WindowMode {
    /// Rolling applies only when a full year is asked for the year `today` is in.
    #[must_use]
    pub fn for_request(full_year: bool, year: i32, today: NaiveDate) -> Self {
        if full_year && year == today.year() {
            Self::Rolling
        } else {
            Self::CalendarYear
        }
    }
}

/// Inclusive range of days a grid is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;
const ROLLING_DAYS: u64 = 365;

impl Window {
    /// January 1 through December 31 of `year`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for years outside `1..=9999`.
    pub fn calendar_year(year: i32) -> Result<Self, TesseraError> {
        let start = bounded_date(year, 1, 1)?;
        let end = bounded_date(year, 12, 31)?;
        Ok(Self { start, end })
    }

    /// The 365 days before `today`, through `today`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the window would leave years `1..=9999`.
    pub fn rolling(today: NaiveDate) -> Result<Self, TesseraError> {
        let start = today
            .checked_sub_days(Days::new(ROLLING_DAYS))
            .filter(|d| d.year() >= MIN_YEAR && today.year() <= MAX_YEAR)
            .ok_or_else(|| {
                TesseraError::InvalidArg(format!("rolling window ending {today} is out of range"))
            })?;
        Ok(Self { start, end: today })
    }

    /// Window for `year` under `mode`, reading "today" for rolling windows.
    ///
    /// # Errors
    /// Propagates the range checks of [`Window::calendar_year`] and [`Window::rolling`].
    pub fn for_mode(mode: WindowMode, year: i32, today: NaiveDate) -> Result<Self, TesseraError> {
        match mode {
            WindowMode::CalendarYear => Self::calendar_year(year),
            WindowMode::Rolling => Self::rolling(today),
        }
    }

    /// Sunday the first week column starts on.
    #[must_use]
    pub fn first_week_start(&self, anchor: WeekAnchor) -> NaiveDate {
        let offset = u64::from(self.start.weekday().num_days_from_sunday());
        match anchor {
            WeekAnchor::Backward => self.start - Days::new(offset),
            _ if offset == 0 => self.start,
            _ => self.start + Days::new(7 - offset),
        }
    }
}

fn bounded_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, TesseraError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TesseraError::InvalidArg(format!(
            "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TesseraError::InvalidArg(format!("invalid date {year}-{month}-{day}")))
}

/// Project `series` onto Sunday-anchored week columns covering `window`.
///
/// Columns start at [`Window::first_week_start`] and advance a week at a time
/// while the start is not after the window end. Each column lists Sunday
/// through Saturday and stops early at the window end, so only the last column
/// can be short. Cells carry the first record with a matching date.
#[must_use]
pub fn project_grid(series: &ContributionHistory, window: Window, anchor: WeekAnchor) -> Grid {
    let index = series.date_index();
    let mut grid: Grid = Vec::new();
    let mut week_start = window.first_week_start(anchor);
    while week_start <= window.end {
        let column: WeekColumn = (0..7)
            .map(|offset| week_start + Days::new(offset))
            .take_while(|date| *date <= window.end)
            .map(|date| Cell {
                date,
                info: index.get(&date).map(|r| (*r).clone()),
            })
            .collect();
        grid.push(column);
        week_start = week_start + Days::new(7);
    }
    grid
}
