use std::time::Duration;

use tessera::{Capability, FetchStrategy, Tessera, TesseraError};
use tessera_core::ContributionHistory;
use tessera_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{MockConnector, counts, d, june_2023, record, summary};

async fn delayed_pair(
    strategy: FetchStrategy,
) -> Result<Vec<tessera::YearGraphData>, TesseraError> {
    let (primary, p_ctl) = DynamicMockConnector::new_with_controller("gh-dyn");
    let (secondary, s_ctl) = DynamicMockConnector::new_with_controller("gl-dyn");
    p_ctl
        .set_history_behavior(
            "alice",
            MockBehavior::Delay(Duration::from_millis(100), june_2023()),
        )
        .await;
    s_ctl
        .set_counts_behavior(
            "alice",
            MockBehavior::Delay(
                Duration::from_millis(100),
                counts(&[(d(2023, 6, 1), 3)]),
            ),
        )
        .await;

    let tessera = Tessera::builder()
        .with_primary(primary)
        .with_secondary(secondary)
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .fetch_strategy(strategy)
        .request_timeout(Duration::from_millis(150))
        .build()?;
    tessera.graph().years(&[2023])?.run().await
}

#[tokio::test(start_paused = true)]
async fn concurrent_fetch_fits_within_deadline() {
    let graphs = delayed_pair(FetchStrategy::Concurrent).await.unwrap();
    assert_eq!(graphs[0].total_count, 9);
}

#[tokio::test(start_paused = true)]
async fn sequential_fetch_exceeds_deadline() {
    let err = delayed_pair(FetchStrategy::Sequential).await.unwrap_err();
    assert_eq!(err, TesseraError::request_timeout("graph-data"));
}

#[tokio::test(start_paused = true)]
async fn hanging_secondary_hits_provider_timeout() {
    let (secondary, s_ctl) = DynamicMockConnector::new_with_controller("gl-dyn");
    s_ctl.set_counts_behavior("alice", MockBehavior::Hang).await;

    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(secondary)
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .provider_timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let err = tessera.graph().years(&[2023]).unwrap().run().await.unwrap_err();
    assert_eq!(err, TesseraError::provider_timeout("gl-dyn", "daily-counts"));
}

#[tokio::test]
async fn sequential_stops_at_first_failure() {
    let (first, first_ctl) = DynamicMockConnector::new_with_controller("first");
    let (second, second_ctl) = DynamicMockConnector::new_with_controller("second");
    first_ctl
        .set_counts_behavior(
            "alice",
            MockBehavior::Fail(TesseraError::connector("first", "boom")),
        )
        .await;

    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(first)
        .with_secondary(second)
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .fetch_strategy(FetchStrategy::Sequential)
        .build()
        .unwrap();

    let err = tessera.graph().years(&[2023]).unwrap().run().await.unwrap_err();
    assert_eq!(err, TesseraError::connector("first", "boom"));
    assert!(second_ctl.requests().await.is_empty());
}

#[tokio::test]
async fn primary_failure_fails_the_request() {
    let gh = MockConnector::new("gh")
        .with_history(|_| Err(TesseraError::connector("gh", "status 500")));
    let tessera = Tessera::builder()
        .with_primary(gh.arc())
        .with_secondary(MockConnector::secondary("gl", counts(&[(d(2023, 6, 1), 1)])).arc())
        .default_primary_user("alice")
        .default_secondary_user("alice")
        .build()
        .unwrap();

    let err = tessera.graph().years(&[2023]).unwrap().run().await.unwrap_err();
    assert_eq!(err, TesseraError::connector("gh", "status 500"));
}

#[tokio::test]
async fn history_only_secondary_contributes_its_counts() {
    let (secondary, s_ctl) =
        DynamicMockConnector::with_capabilities("gh-too", &[Capability::History]);
    let other = ContributionHistory {
        years: vec![summary(2023, 4)],
        contributions: vec![record(d(2023, 6, 2), 2, "#9be9a8", "1")],
    };
    s_ctl
        .set_history_behavior("bob", MockBehavior::Return(other))
        .await;

    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(secondary)
        .default_primary_user("alice")
        .default_secondary_user("bob")
        .build()
        .unwrap();

    let series = tessera
        .merged_series(&tessera::GraphRequest::new([2023]))
        .await
        .unwrap();
    assert_eq!(series.record(d(2023, 6, 2)).unwrap().count, 5);
    assert_eq!(
        s_ctl.requests().await,
        vec![(Capability::History, "bob".to_string())]
    );
}

#[tokio::test]
async fn no_deadline_waits_for_slow_sources() {
    let slow = MockConnector::primary("gh", june_2023()).delay(50);
    let tessera = Tessera::builder()
        .with_primary(slow.arc())
        .default_primary_user("alice")
        .build()
        .unwrap();
    assert!(tessera.config().request_timeout.is_none());
    let graphs = tessera.graph().years(&[2023]).unwrap().run().await.unwrap();
    assert_eq!(graphs[0].total_count, 8);
}
