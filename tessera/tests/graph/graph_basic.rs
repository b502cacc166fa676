use chrono::{Datelike, Days};
use tessera::{Tessera, TesseraError, TotalsPolicy, YearGraphData};
use tessera_core::ContributionHistory;

use crate::helpers::{MockConnector, clock, counts, d, june_2023, record, summary};

fn find_cell(graph: &YearGraphData, date: chrono::NaiveDate) -> Option<&tessera::Cell> {
    graph.blocks.iter().flatten().find(|c| c.date == date)
}

#[tokio::test]
async fn merges_secondary_counts_into_primary_graph() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(
            MockConnector::secondary("gl", counts(&[(d(2023, 6, 1), 3), (d(2023, 6, 2), 2)]))
                .arc(),
        )
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .clock(clock(2024, 3, 1))
        .build()
        .unwrap();

    let graphs = tessera.graph().years(&[2023]).unwrap().run().await.unwrap();
    assert_eq!(graphs.len(), 1);
    let g = &graphs[0];
    assert_eq!(g.year, 2023);
    assert_eq!(g.total_count, 10, "two touched days add one each");

    let first = find_cell(g, d(2023, 6, 1)).and_then(|c| c.info.as_ref()).unwrap();
    assert_eq!(first.count, 8);
    assert_eq!(first.color, "#ff0000");
    assert_eq!(first.intensity, None);

    let second = find_cell(g, d(2023, 6, 2)).and_then(|c| c.info.as_ref()).unwrap();
    assert_eq!(second.count, 5);
    assert_eq!(second.color, "#40c463");
    assert_eq!(second.intensity.as_deref(), Some("2"));

    let untouched = find_cell(g, d(2023, 6, 3)).unwrap();
    assert!(untouched.info.is_none());
}

#[tokio::test]
async fn summed_totals_and_custom_overflow_color() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(
            MockConnector::secondary("gl", counts(&[(d(2023, 6, 1), 3), (d(2023, 6, 2), 2)]))
                .arc(),
        )
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .totals_policy(TotalsPolicy::SummedCounts)
        .overflow_color("#123456")
        .clock(clock(2024, 3, 1))
        .build()
        .unwrap();

    let series = tessera
        .merged_series(&tessera::GraphRequest::new([2023]))
        .await
        .unwrap();
    assert_eq!(series.years[0].total, 13);
    assert_eq!(series.contributions[0].color, "#123456");
}

#[tokio::test]
async fn secondaries_fold_in_registration_order() {
    // 3 + 1 + 1 lands on the "5" bucket only after both folds.
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(MockConnector::secondary("a", counts(&[(d(2023, 6, 2), 1)])).arc())
        .with_secondary(MockConnector::secondary("b", counts(&[(d(2023, 6, 2), 1)])).arc())
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .build()
        .unwrap();

    let series = tessera
        .merged_series(&tessera::GraphRequest::new([2023]))
        .await
        .unwrap();
    let r = series.record(d(2023, 6, 2)).unwrap();
    assert_eq!(r.count, 5);
    assert_eq!(r.color, "#40c463");
    assert_eq!(series.years[0].total, 10);
}

#[tokio::test]
async fn empty_primary_history_is_data_unavailable() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", ContributionHistory::default()).arc())
        .default_primary_user("alice")
        .build()
        .unwrap();

    let err = tessera.graph().years(&[2023]).unwrap().run().await.unwrap_err();
    assert_eq!(err, TesseraError::DataUnavailable);
    assert_eq!(err.to_string(), "No data available.");
}

#[tokio::test]
async fn graphs_follow_request_order() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .default_primary_user("alice")
        .clock(clock(2024, 3, 1))
        .build()
        .unwrap();

    let graphs = tessera
        .graph()
        .years(&[2024, 2022, 2023])
        .unwrap()
        .run()
        .await
        .unwrap();
    let years: Vec<i32> = graphs.iter().map(|g| g.year).collect();
    assert_eq!(years, vec![2024, 2022, 2023]);
    // Only 2023 has a summary.
    assert_eq!(graphs[0].total_count, 0);
    assert_eq!(graphs[1].total_count, 0);
    assert_eq!(graphs[2].total_count, 8);
}

fn daily_history(from: chrono::NaiveDate, to: chrono::NaiveDate) -> ContributionHistory {
    let mut contributions = Vec::new();
    let mut day = from;
    while day <= to {
        contributions.push(record(day, 1, "#9be9a8", "1"));
        day = day + Days::new(1);
    }
    let years = (from.year()..=to.year()).map(|y| summary(y, 1)).collect();
    ContributionHistory {
        years,
        contributions,
    }
}

#[tokio::test]
async fn full_year_uses_rolling_window_for_current_year() {
    let history = daily_history(d(2023, 1, 1), d(2024, 6, 15));
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", history).arc())
        .default_primary_user("alice")
        .clock(clock(2024, 6, 15))
        .build()
        .unwrap();

    let graphs = tessera
        .graph()
        .years(&[2024])
        .unwrap()
        .full_year(true)
        .run()
        .await
        .unwrap();
    let g = &graphs[0];
    // 2023-06-15 ..= 2024-06-14 spans a leap day.
    assert_eq!(g.total_count, 366);
    let last = g.blocks.last().and_then(|w| w.last()).unwrap();
    assert_eq!(last.date, d(2024, 6, 15));
}

#[tokio::test]
async fn full_year_on_past_year_is_calendar_year() {
    let history = daily_history(d(2023, 1, 1), d(2024, 6, 15));
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", history).arc())
        .default_primary_user("alice")
        .clock(clock(2024, 6, 15))
        .build()
        .unwrap();

    let rolling_flag = tessera
        .graph()
        .years(&[2023])
        .unwrap()
        .full_year(true)
        .run()
        .await
        .unwrap();
    let calendar = tessera.graph().years(&[2023]).unwrap().run().await.unwrap();
    assert_eq!(rolling_flag, calendar);
    assert_eq!(calendar[0].total_count, 1, "summary total, not a record sum");
}

#[tokio::test]
async fn out_of_range_year_is_invalid() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .default_primary_user("alice")
        .build()
        .unwrap();

    let err = tessera.graph().years(&[0]).unwrap().run().await.unwrap_err();
    assert!(matches!(err, TesseraError::InvalidArg(_)));
}

#[tokio::test]
async fn graph_data_serializes_camel_case() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .default_primary_user("alice")
        .clock(clock(2024, 3, 1))
        .build()
        .unwrap();

    let graphs = tessera.graph().years(&[2023]).unwrap().run().await.unwrap();
    let json = serde_json::to_value(&graphs).unwrap();
    assert_eq!(json[0]["totalCount"], 8);
    assert!(json[0]["monthLabels"].is_array());
    assert_eq!(json[0]["blocks"][0][0]["date"], "2023-01-01");
}

#[tokio::test]
async fn single_touched_day_adds_one_to_year_total() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(MockConnector::secondary("gl", counts(&[(d(2023, 6, 1), 2)])).arc())
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .build()
        .unwrap();

    let series = tessera
        .merged_series(&tessera::GraphRequest::new([2022]))
        .await
        .unwrap();
    assert_eq!(series.contributions[0].count, 7);
    assert_eq!(series.contributions[1], june_2023().contributions[1]);
    assert_eq!(series.years[0].total, 9);
}
