use chrono::{Datelike, NaiveDate};
use tessera_core::{ContributionHistory, ContributionRecord, DateRange, YearSummary};

/// Fixture history for a known user.
pub fn by_user(user: &str) -> Option<ContributionHistory> {
    match user {
        "octocat" => Some(build(2023, 2024, 7)),
        "torvalds" => Some(build(2024, 2024, 3)),
        "EMPTY" => Some(ContributionHistory::default()),
        _ => None,
    }
}

/// Activity bucket for a count, in the five-level scheme of the public calendar.
pub fn classify(count: u32) -> (&'static str, &'static str) {
    match count {
        0 => ("#ebedf0", "0"),
        1..=2 => ("#9be9a8", "1"),
        3..=5 => ("#40c463", "2"),
        6..=8 => ("#30a14e", "3"),
        _ => ("#216e39", "4"),
    }
}

/// One record per day of `first..=last`, with counts cycling on a `seed`-dependent pattern.
fn build(first: i32, last: i32, seed: u32) -> ContributionHistory {
    let mut years = Vec::new();
    let mut contributions = Vec::new();
    for year in first..=last {
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            continue;
        };
        let mut total = 0u64;
        for date in start.iter_days().take_while(|d| *d <= end) {
            let count = (date.ordinal() * seed) % 13 / 2;
            total += u64::from(count);
            let (color, level) = classify(count);
            contributions.push(ContributionRecord {
                date,
                count,
                color: color.to_string(),
                intensity: Some(level.to_string()),
            });
        }
        years.push(YearSummary {
            year,
            total,
            range: DateRange { start, end },
        });
    }
    ContributionHistory {
        years,
        contributions,
    }
}
