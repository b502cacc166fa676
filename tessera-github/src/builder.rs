use std::time::Duration;

use tessera_core::TesseraError;
use url::Url;

use crate::GithubConnector;
use crate::adapter::RealAdapter;

/// Public API serving GitHub contribution calendars as JSON.
pub const DEFAULT_BASE_URL: &str = "https://github-contributions-api.jogruber.de/v4";

const DEFAULT_USER_AGENT: &str = concat!("tessera-github/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for [`GithubConnector`].
#[derive(Debug, Clone)]
pub struct GithubConnectorBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    default_user: Option<String>,
    client: Option<reqwest::Client>,
}

impl Default for GithubConnectorBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_user: None,
            client: None,
        }
    }
}

impl GithubConnectorBuilder {
    /// Point the connector at another deployment of the API.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// User agent sent with every request.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Per-request HTTP timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Username queried when the caller does not name one.
    #[must_use]
    pub fn default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = Some(user.into());
        self
    }

    /// Reuse an existing HTTP client. User agent and timeout settings are then ignored.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparseable base URL, or `Other` if the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<GithubConnector, TesseraError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| TesseraError::InvalidArg(format!("base url {}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(TesseraError::InvalidArg(format!(
                "base url {} cannot take a path",
                self.base_url
            )));
        }
        let http = match self.client {
            Some(c) => c,
            None => reqwest::Client::builder()
                .user_agent(self.user_agent)
                .timeout(self.timeout)
                .build()
                .map_err(|e| TesseraError::Other(format!("http client: {e}")))?,
        };
        let adapter = RealAdapter::new(http, base);
        Ok(GithubConnector::from_real(&adapter, self.default_user))
    }
}

impl GithubConnector {
    /// Returns a builder with the public API, a ten second timeout, and no default user.
    #[must_use]
    pub fn builder() -> GithubConnectorBuilder {
        GithubConnectorBuilder::default()
    }

    /// Connector with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, TesseraError> {
        Self::builder().build()
    }
}
