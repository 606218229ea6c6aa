//! HTTP page fetching with browser-like headers.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use wordwire_http::{HttpClient, HttpError, RequestOpts};

use crate::ScrapeError;

/// Issues page GETs with a fixed user agent and optional session cookie.
///
/// URLs are always absolute; the anchor URL passed to [`PageFetcher::new`]
/// only seats the underlying client. One fetch is one request, no retries:
/// a failed run is expected to fail loudly and be rerun by the scheduler.
pub struct PageFetcher {
    http: HttpClient,
    headers: HeaderMap,
}

impl PageFetcher {
    pub fn new(anchor_url: &str, user_agent: &str, cookie: Option<&str>) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| HttpError::Build(format!("invalid user agent: {e}")))?,
        );
        if let Some(cookie) = cookie {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie)
                    .map_err(|e| HttpError::Build(format!("invalid cookie: {e}")))?,
            );
        }
        let http = HttpClient::new(anchor_url).map_err(ScrapeError::Fetch)?;
        Ok(Self { http, headers })
    }

    /// GET one page body. Non-2xx statuses surface as [`ScrapeError::Fetch`].
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let body = self
            .http
            .get_text(
                url,
                RequestOpts {
                    headers: Some(self.headers.clone()),
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await?;
        Ok(body)
    }
}
