//! Response shapes of the contributions API and their conversion into the core model.
//!
//! Two body shapes are accepted. The v4 API reports yearly totals as a map
//! `total: {"2023": 8, "lastYear": 8}` and tags days with a numeric `level`.
//! Older deployments send `years: [{year, total, range}]` and colored days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use tessera_core::{ContributionHistory, ContributionRecord, DateRange, YearSummary};

/// A field the API has served both as a JSON string and as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Loose {
    Int(i64),
    Str(String),
}

impl Loose {
    fn into_string(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s,
        }
    }

    fn to_year(&self) -> Result<i32, String> {
        match self {
            Self::Int(n) => i32::try_from(*n).map_err(|_| format!("year {n} out of range")),
            Self::Str(s) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year {s:?}")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireHistory {
    #[serde(default)]
    years: Vec<WireYear>,
    #[serde(default)]
    total: BTreeMap<String, u64>,
    #[serde(default)]
    contributions: Vec<WireDay>,
}

#[derive(Debug, Deserialize)]
struct WireYear {
    year: Loose,
    total: u64,
    range: WireRange,
}

#[derive(Debug, Deserialize)]
struct WireRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct WireDay {
    date: NaiveDate,
    count: u32,
    #[serde(default)]
    color: String,
    #[serde(default, alias = "level")]
    intensity: Option<Loose>,
}

/// Year summary from a v4 `total` entry; rolling keys such as `lastYear` yield `None`.
fn summary_from_total(key: &str, total: u64) -> Result<Option<YearSummary>, String> {
    let Ok(year) = key.parse::<i32>() else {
        return Ok(None);
    };
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(YearSummary {
            year,
            total,
            range: DateRange { start, end },
        })),
        _ => Err(format!("year {year} out of range")),
    }
}

impl WireHistory {
    /// Convert to the core model, ordering records by date.
    pub(crate) fn into_history(self) -> Result<ContributionHistory, String> {
        let mut years = self
            .years
            .into_iter()
            .map(|y| {
                Ok(YearSummary {
                    year: y.year.to_year()?,
                    total: y.total,
                    range: DateRange {
                        start: y.range.start,
                        end: y.range.end,
                    },
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        if years.is_empty() {
            // Newest first, as the years array is ordered.
            for (key, total) in self.total.iter().rev() {
                if let Some(summary) = summary_from_total(key, *total)? {
                    years.push(summary);
                }
            }
        }

        let mut contributions: Vec<ContributionRecord> = self
            .contributions
            .into_iter()
            .map(|d| ContributionRecord {
                date: d.date,
                count: d.count,
                color: d.color,
                intensity: d.intensity.map(Loose::into_string),
            })
            .collect();
        contributions.sort_by_key(|r| r.date);

        Ok(ContributionHistory {
            years,
            contributions,
        })
    }
}
