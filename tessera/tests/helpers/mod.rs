// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

pub mod mock_connector;

use std::sync::Arc;

use chrono::NaiveDate;
pub use mock_connector::MockConnector;
use tessera_core::{
    Clock, ContributionHistory, ContributionRecord, DailyCounts, DateRange, FixedClock,
    YearSummary,
};

/// Shorthand date constructor for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

/// Clock pinned to the given day.
pub fn clock(y: i32, m: u32, day: u32) -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(d(y, m, day)))
}

pub fn summary(year: i32, total: u64) -> YearSummary {
    YearSummary {
        year,
        total,
        range: DateRange {
            start: d(year, 1, 1),
            end: d(year, 12, 31),
        },
    }
}

pub fn record(date: NaiveDate, count: u32, color: &str, intensity: &str) -> ContributionRecord {
    ContributionRecord {
        date,
        count,
        color: color.to_string(),
        intensity: Some(intensity.to_string()),
    }
}

/// The two-day 2023 history used by the merge scenarios.
pub fn june_2023() -> ContributionHistory {
    ContributionHistory {
        years: vec![summary(2023, 8)],
        contributions: vec![
            record(d(2023, 6, 1), 5, "#40c463", "2"),
            record(d(2023, 6, 2), 3, "#9be9a8", "1"),
        ],
    }
}

pub fn counts(entries: &[(NaiveDate, u32)]) -> DailyCounts {
    entries.iter().copied().collect()
}
