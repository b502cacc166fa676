use std::time::Duration;

use tessera_core::TesseraError;
use url::Url;

use crate::GitlabConnector;
use crate::adapter::RealAdapter;

/// GitLab instance queried by default.
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";

const DEFAULT_USER_AGENT: &str = concat!("tessera-gitlab/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for [`GitlabConnector`].
#[derive(Debug, Clone)]
pub struct GitlabConnectorBuilder {
    base_url: String,
    cors_relay: Option<String>,
    user_agent: String,
    timeout: Duration,
    default_user: Option<String>,
    client: Option<reqwest::Client>,
}

impl Default for GitlabConnectorBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cors_relay: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_user: None,
            client: None,
        }
    }
}

impl GitlabConnectorBuilder {
    /// Query a self-hosted GitLab instance instead of gitlab.com.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Prefix prepended verbatim to every request URL, for CORS relays.
    #[must_use]
    pub fn cors_relay(mut self, prefix: impl Into<String>) -> Self {
        self.cors_relay = Some(prefix.into());
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
    pub fn build(self) -> Result<GitlabConnector, TesseraError> {
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
        let relay = self.cors_relay.filter(|p| !p.is_empty());
        let adapter = RealAdapter::new(http, base, relay);
        Ok(GitlabConnector::from_real(&adapter, self.default_user))
    }
}

impl GitlabConnector {
    /// Returns a builder for gitlab.com with no relay and no default user.
    #[must_use]
    pub fn builder() -> GitlabConnectorBuilder {
        GitlabConnectorBuilder::default()
    }

    /// Connector with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, TesseraError> {
        Self::builder().build()
    }
}
