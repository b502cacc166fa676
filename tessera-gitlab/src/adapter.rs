#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tessera_core::{DailyCounts, TesseraError, parse_iso_date};
use url::Url;

const CONNECTOR: &str = "tessera-gitlab";

/// Activity calendar abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait GlCalendar: Send + Sync {
    /// Fetch per-day contribution counts of `user`.
    async fn fetch(&self, user: &str) -> Result<DailyCounts, TesseraError>;
}

/// Body of `users/{user}/calendar.json`: ISO dates mapped to counts.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct WireCalendar(BTreeMap<String, u32>);

impl WireCalendar {
    fn into_counts(self) -> Result<DailyCounts, TesseraError> {
        self.0
            .into_iter()
            .map(|(day, count)| Ok((parse_iso_date(&day)?, count)))
            .collect()
    }
}

/// Production adapter issuing `GET {relay}{base}/users/{user}/calendar.json` with `reqwest`.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
    relay: Option<String>,
}

impl RealAdapter {
    /// Wrap an HTTP client, the instance base URL, and an optional CORS relay prefix.
    #[must_use]
    pub const fn new(http: reqwest::Client, base: Url, relay: Option<String>) -> Self {
        Self { http, base, relay }
    }

    /// Full request URL for `user`, relay prefix included.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the base URL cannot take path segments.
    pub fn calendar_url(&self, user: &str) -> Result<String, TesseraError> {
        let mut target = self.base.clone();
        target
            .path_segments_mut()
            .map_err(|()| {
                TesseraError::InvalidArg(format!("base url {} cannot take a path", self.base))
            })?
            .pop_if_empty()
            .extend(["users", user, "calendar.json"]);
        Ok(match &self.relay {
            Some(prefix) => format!("{prefix}{target}"),
            None => target.into(),
        })
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
impl GlCalendar for RealAdapter {
    async fn fetch(&self, user: &str) -> Result<DailyCounts, TesseraError> {
        let context = format!("activity calendar for {user}");
        let url = self.calendar_url(user)?;
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

        let wire: WireCalendar = resp
            .json()
            .await
            .map_err(|e| map_http_err(&e, &context))?;
        wire.into_counts()
            .map_err(|e| TesseraError::connector(CONNECTOR, format!("{context}: {e}")))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn GlCalendar {
    /// Build a `GlCalendar` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn GlCalendar>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<DailyCounts, TesseraError>,
    {
        struct FnCalendar<F>(F);
        #[async_trait]
        impl<F> GlCalendar for FnCalendar<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<DailyCounts, TesseraError>,
        {
            async fn fetch(&self, user: &str) -> Result<DailyCounts, TesseraError> {
                (self.0)(user.to_string())
            }
        }
        Arc::new(FnCalendar(f))
    }
}
