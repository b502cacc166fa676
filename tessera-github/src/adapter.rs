#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tessera_core::{ContributionHistory, TesseraError};
use url::Url;

use crate::wire::WireHistory;

const CONNECTOR: &str = "tessera-github";

/// Contribution calendar abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait GhCalendar: Send + Sync {
    /// Fetch the full contribution history of `user`.
    async fn fetch(&self, user: &str) -> Result<ContributionHistory, TesseraError>;
}

/// Production adapter issuing `GET {base}/{user}` with `reqwest`.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Wrap an HTTP client and the API base URL.
    #[must_use]
    pub const fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn user_url(&self, user: &str) -> Result<Url, TesseraError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TesseraError::InvalidArg(format!("base url {} cannot take a path", self.base))
            })?
            .pop_if_empty()
            .push(user);
        Ok(url)
    }
}

fn map_http_err(e: &reqwest::Error, context: &str) -> TesseraError {
    if e.is_timeout() {
        TesseraError::connector(CONNECTOR, format!("timeout: {context}"))
    } else if e.is_decode() {
        TesseraError::connector(CONNECTOR, format!("decode {context}: {e}"))
    } else {
        TesseraError::connector(CONNECTOR, format!("{context}: {e}"))
    }
}

#[async_trait]
impl GhCalendar for RealAdapter {
    async fn fetch(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
        let context = format!("contributions for {user}");
        let url = self.user_url(user)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_http_err(&e, &context))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(TesseraError::not_found(context)),
            s if !s.is_success() => {
                return Err(TesseraError::connector(
                    CONNECTOR,
                    format!("status {s}: {context}"),
                ));
            }
            _ => {}
        }

        let wire: WireHistory = resp
            .json()
            .await
            .map_err(|e| map_http_err(&e, &context))?;
        wire.into_history()
            .map_err(|msg| TesseraError::connector(CONNECTOR, format!("{context}: {msg}")))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn GhCalendar {
    /// Build a `GhCalendar` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn GhCalendar>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<ContributionHistory, TesseraError>,
    {
        struct FnCalendar<F>(F);
        #[async_trait]
        impl<F> GhCalendar for FnCalendar<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<ContributionHistory, TesseraError>,
        {
            async fn fetch(&self, user: &str) -> Result<ContributionHistory, TesseraError> {
                (self.0)(user.to_string())
            }
        }
        Arc::new(FnCalendar(f))
    }
}
