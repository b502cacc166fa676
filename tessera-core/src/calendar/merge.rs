use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::series::{ContributionHistory, ContributionRecord, DailyCounts};
use crate::{DEFAULT_OVERFLOW_COLOR, TesseraConfig, TotalsPolicy};

/// Knobs for folding raw counts into a classified history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Color given to merged days whose count matches no observed bucket.
    pub overflow_color: String,
    /// How merged days adjust the yearly totals.
    pub totals: TotalsPolicy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            overflow_color: DEFAULT_OVERFLOW_COLOR.to_string(),
            totals: TotalsPolicy::default(),
        }
    }
}

impl MergeOptions {
    /// Extract merge options from the orchestrator configuration.
    #[must_use]
    pub fn from_config(cfg: &TesseraConfig) -> Self {
        Self {
            overflow_color: cfg.overflow_color.clone(),
            totals: cfg.totals_policy,
        }
    }
}

/// Fold a secondary source's per-day counts into a classified primary history.
///
/// - Only days present in `primary` are considered; extra secondary days are dropped,
///   so the output has exactly as many records as the input.
/// - A merged day's count is the sum of both sources (saturating).
/// - The merged day takes the color and intensity of the last primary record
///   with the same count. With no such record it gets `overflow_color` and no intensity.
/// - Yearly totals grow per merged day: by one under `TotalsPolicy::TouchedDays`,
///   by the secondary count under `TotalsPolicy::SummedCounts`.
#[must_use]
pub fn merge_contributions(
    primary: ContributionHistory,
    secondary: &DailyCounts,
    opts: &MergeOptions,
) -> ContributionHistory {
    let ContributionHistory {
        years,
        contributions,
    } = primary;

    let buckets: HashMap<u32, (&str, Option<&str>)> = contributions
        .iter()
        .map(|r| (r.count, (r.color.as_str(), r.intensity.as_deref())))
        .collect();

    let mut additions: BTreeMap<i32, u64> = BTreeMap::new();
    let mut merged: Vec<ContributionRecord> = Vec::with_capacity(contributions.len());
    for record in &contributions {
        let Some(extra) = secondary.get(record.date) else {
            merged.push(record.clone());
            continue;
        };
        let count = record.count.saturating_add(extra);
        let bump = match opts.totals {
            TotalsPolicy::SummedCounts => u64::from(extra),
            _ => 1,
        };
        *additions.entry(record.date.year()).or_default() += bump;

        let (color, intensity) = buckets.get(&count).map_or_else(
            || (opts.overflow_color.clone(), None),
            |(c, i)| ((*c).to_string(), i.map(str::to_string)),
        );
        merged.push(ContributionRecord {
            date: record.date,
            count,
            color,
            intensity,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(additions = ?additions, "folded secondary counts into primary history");

    let years = years
        .into_iter()
        .map(|mut y| {
            if let Some(add) = additions.get(&y.year) {
                y.total = y.total.saturating_add(*add);
            }
            y
        })
        .collect();

    ContributionHistory {
        years,
        contributions: merged,
    }
}

/// Fold several secondary sources into `primary`, in iteration order.
///
/// Each fold reclassifies against the history produced by the previous one.
#[must_use]
pub fn merge_all<'a, I>(
    primary: ContributionHistory,
    secondaries: I,
    opts: &MergeOptions,
) -> ContributionHistory
where
    I: IntoIterator<Item = &'a DailyCounts>,
{
    secondaries
        .into_iter()
        .fold(primary, |acc, counts| merge_contributions(acc, counts, opts))
}
