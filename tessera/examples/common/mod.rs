use std::sync::Arc;

use tessera::TesseraConnector;

/// Primary and secondary sources for the demos.
///
/// Set `TESSERA_DEMOS_USE_MOCK` to run against fixture data instead of the network.
pub fn get_sources() -> Result<(Arc<dyn TesseraConnector>, Arc<dyn TesseraConnector>), tessera::TesseraError>
{
    if std::env::var("TESSERA_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        let mock: Arc<dyn TesseraConnector> = Arc::new(tessera_mock::MockConnector::new());
        Ok((Arc::clone(&mock), mock))
    } else {
        let gh = tessera_github::GithubConnector::builder().build()?;
        let gl = tessera_gitlab::GitlabConnector::builder().build()?;
        Ok((Arc::new(gh), Arc::new(gl)))
    }
}

/// Install a stderr subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
