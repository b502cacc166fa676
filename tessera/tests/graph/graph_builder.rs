use tessera::{
    Capability, FetchStrategy, GraphRequest, Tessera, TesseraConfig, TesseraConnector,
    TesseraError, WeekAnchor,
};
use tessera_mock::DynamicMockConnector;

use crate::helpers::{MockConnector, clock, d, june_2023};

#[test]
fn build_requires_primary() {
    let err = Tessera::builder().build().err().unwrap();
    assert!(matches!(err, TesseraError::InvalidArg(_)));
}

#[test]
fn primary_must_provide_history() {
    let (counts_only, _ctl) =
        DynamicMockConnector::with_capabilities("counts-only", &[Capability::DailyCounts]);
    let err = Tessera::builder()
        .with_primary(counts_only)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, TesseraError::unsupported("history via counts-only"));
}

#[test]
fn secondary_needs_counts_or_history() {
    let (useless, _ctl) = DynamicMockConnector::with_capabilities("nothing", &[]);
    let err = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(useless)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, TesseraError::unsupported("daily-counts via nothing"));
}

#[test]
fn builder_settings_land_in_config() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .with_secondary(MockConnector::secondary("gl", Default::default()).arc())
        .fetch_strategy(FetchStrategy::Sequential)
        .week_anchor(WeekAnchor::Backward)
        .default_primary_user("alice")
        .clock(clock(2024, 2, 29))
        .build()
        .unwrap();

    let cfg = tessera.config();
    assert_eq!(cfg.fetch_strategy, FetchStrategy::Sequential);
    assert_eq!(cfg.week_anchor, WeekAnchor::Backward);
    assert_eq!(cfg.default_primary_user.as_deref(), Some("alice"));
    assert_eq!(tessera.primary().name(), "gh");
    assert_eq!(tessera.secondaries().len(), 1);
    assert_eq!(tessera.today(), d(2024, 2, 29));
}

#[test]
fn whole_config_can_be_replaced() {
    let cfg = TesseraConfig {
        overflow_color: "#000".into(),
        ..TesseraConfig::default()
    };
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .config(cfg)
        .build()
        .unwrap();
    assert_eq!(tessera.config().overflow_color, "#000");
}

#[test]
fn graph_builder_rejects_bad_year_lists() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .build()
        .unwrap();

    assert!(matches!(
        tessera.graph().years(&[]),
        Err(TesseraError::InvalidArg(_))
    ));
    assert!(matches!(
        tessera.graph().years(&[2023, 2024, 2023]),
        Err(TesseraError::InvalidArg(_))
    ));
    assert!(matches!(
        tessera.graph().add_year(2023).unwrap().add_year(2023),
        Err(TesseraError::InvalidArg(_))
    ));
}

#[test]
fn graph_builder_assembles_request() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .build()
        .unwrap();

    let builder = tessera
        .graph()
        .add_year(2024)
        .unwrap()
        .add_year(2023)
        .unwrap()
        .full_year(true)
        .primary_user("alice")
        .secondary_user("bob");
    let expected = GraphRequest {
        full_year: true,
        primary_user: Some("alice".into()),
        secondary_user: Some("bob".into()),
        years: vec![2024, 2023],
    };
    assert_eq!(builder.request(), &expected);
}

#[tokio::test]
async fn run_without_years_is_invalid() {
    let tessera = Tessera::builder()
        .with_primary(MockConnector::primary("gh", june_2023()).arc())
        .default_primary_user("alice")
        .build()
        .unwrap();

    let err = tessera.graph().run().await.unwrap_err();
    assert!(matches!(err, TesseraError::InvalidArg(_)));
}
