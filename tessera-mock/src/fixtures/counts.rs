use chrono::{Days, NaiveDate};
use tessera_core::DailyCounts;

/// Fixture per-day counts for a known user.
pub fn by_user(user: &str) -> Option<DailyCounts> {
    match user {
        "octocat" => Some(every_nth(NaiveDate::from_ymd_opt(2023, 1, 2), 730, 5, 2)),
        "jdoe" => Some(every_nth(NaiveDate::from_ymd_opt(2024, 1, 1), 366, 3, 1)),
        "EMPTY" => Some(DailyCounts::new()),
        _ => None,
    }
}

fn every_nth(start: Option<NaiveDate>, span: u64, step: usize, count: u32) -> DailyCounts {
    let Some(start) = start else {
        return DailyCounts::new();
    };
    (0..span)
        .step_by(step)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| (date, count))
        .collect()
}
