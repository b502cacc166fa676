use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TesseraError;

/// One day of activity as reported by a classifying source.
///
/// `color` and `intensity` are opaque tags assigned by the source; they are
/// copied around but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    /// Calendar day of the record.
    pub date: NaiveDate,
    /// Number of contributions on that day.
    pub count: u32,
    /// Source-assigned color tag.
    pub color: String,
    /// Source-assigned intensity tag; absent for merged days with no known bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
}

/// Inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

/// Total contributions for one year of a source's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    /// Calendar year.
    pub year: i32,
    /// Contributions counted for the year.
    pub total: u64,
    /// Days the source considers part of that year.
    pub range: DateRange,
}

/// Full classified contribution history of a single account.
///
/// Delivered by the primary source and produced by the merger; `contributions`
/// is ordered ascending by date with one record per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionHistory {
    /// Yearly summaries, in the order the source delivered them.
    pub years: Vec<YearSummary>,
    /// Per-day records, ascending by date.
    pub contributions: Vec<ContributionRecord>,
}

/// Merged output of all sources; same shape as a single source's history.
pub type UnifiedSeries = ContributionHistory;

impl ContributionHistory {
    /// True when the history carries neither yearly summaries nor records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() && self.contributions.is_empty()
    }

    /// Index of the first record dated `date`.
    #[must_use]
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.contributions.iter().position(|r| r.date == date)
    }

    /// First record dated `date`.
    #[must_use]
    pub fn record(&self, date: NaiveDate) -> Option<&ContributionRecord> {
        self.contributions.iter().find(|r| r.date == date)
    }

    /// Summary for `year`, if the source reported one.
    #[must_use]
    pub fn year_summary(&self, year: i32) -> Option<&YearSummary> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Map every date to its first record, for repeated lookups.
    #[must_use]
    pub fn date_index(&self) -> HashMap<NaiveDate, &ContributionRecord> {
        let mut index = HashMap::with_capacity(self.contributions.len());
        for r in &self.contributions {
            index.entry(r.date).or_insert(r);
        }
        index
    }

    /// Reduce the history to raw per-day counts, dropping classification.
    #[must_use]
    pub fn daily_counts(&self) -> DailyCounts {
        self.contributions.iter().map(|r| (r.date, r.count)).collect()
    }

    /// Ensure no calendar day appears twice among the records.
    ///
    /// # Errors
    /// Returns `TesseraError::Data` naming the first repeated date.
    pub fn ensure_unique_dates(&self) -> Result<(), TesseraError> {
        let mut seen = HashSet::with_capacity(self.contributions.len());
        for r in &self.contributions {
            if !seen.insert(r.date) {
                return Err(TesseraError::Data(format!(
                    "duplicate contribution record for {}",
                    r.date
                )));
            }
        }
        Ok(())
    }
}

/// Raw per-day contribution counts from a non-classifying source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyCounts(BTreeMap<NaiveDate, u32>);

impl DailyCounts {
    /// Empty set of counts.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Count reported for `date`, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<u32> {
        self.0.get(&date).copied()
    }

    /// Set the count for `date`, returning the previous value.
    pub fn insert(&mut self, date: NaiveDate, count: u32) -> Option<u32> {
        self.0.insert(date, count)
    }

    /// Number of days with a reported count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no day has a reported count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate days and counts in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.0.iter().map(|(d, c)| (*d, *c))
    }
}

impl FromIterator<(NaiveDate, u32)> for DailyCounts {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<NaiveDate, u32>> for DailyCounts {
    fn from(map: BTreeMap<NaiveDate, u32>) -> Self {
        Self(map)
    }
}
