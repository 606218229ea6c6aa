//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - Request options: headers, `Auth`, timeout
//! - Redacts `Authorization` and `Cookie` values and never logs secrets
//! - Optional *raw* request/response logging via `WORDWIRE_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), wordwire_http::HttpError> {
//! let client = wordwire_http::HttpClient::new("https://example.com")?;
//! let body = client
//!     .get_text("word-of-the-day", wordwire_http::RequestOpts::default())
//!     .await?;
//! # let _ = body; Ok(()) }
//! ```
//!
//! There is deliberately no retry machinery here: every request is issued
//! exactly once and failures surface to the caller, which matches the
//! run-once-per-day execution model of the binary.
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/header/none), not the secret.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "WORDWIRE_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in headers.iter() {
        let v = if is_secret_header(name.as_str()) {
            "<redacted>".to_string()
        } else {
            val.to_str().unwrap_or("").to_string()
        };
        parts.push(format!(
            "-H '{}: {}'",
            name.as_str(),
            v.replace('\'', r"'\''")
        ));
    }
    if let Some(bytes) = body {
        if let Ok(s) = std::str::from_utf8(bytes) {
            let mut s = s.to_string();
            if s.len() > RAW_MAX_BODY {
                s.truncate(RAW_MAX_BODY);
                s.push('…');
            }
            parts.push(format!("-d '{}'", s.replace('\'', r"'\''")));
        } else {
            parts.push(format!("--data-binary @- # ({} bytes)", bytes.len()));
        }
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

fn is_secret_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("cookie")
}

/// Redact sensitive headers for logging.
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if is_secret_header(&key) {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use wordwire_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Custom header auth
    Header {
        name: HeaderName,
        value: HeaderValue,
    },
    None,
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use wordwire_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     allow_absolute: true,
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.auth.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use wordwire_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://slack.com/api/")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use wordwire_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://slack.com/api/")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET a text body (HTML pages) with per-request options.
    ///
    /// Non-2xx statuses become [`HttpError::Api`]; the body is decoded
    /// lossily so odd encodings never abort a fetch.
    pub async fn get_text(&self, path: &str, opts: RequestOpts<'_>) -> Result<String, HttpError> {
        let (status, _headers, bytes, req_id) = self
            .request_raw::<()>(Method::GET, path, None, opts)
            .await?;

        if !status.is_success() {
            let message = extract_error_message(&bytes);
            tracing::warn!(req_id=%req_id, %status, message=%message, "http.error");
            return Err(HttpError::Api {
                status,
                message,
                request_id: req_id,
            });
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// POST JSON with per-request options, decoding a JSON response.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, headers, bytes, req_id) = self
            .request_raw(Method::POST, path, Some(body), opts)
            .await?;

        let snippet = snip_body(&bytes);
        if !status.is_success() {
            let message = extract_error_message(&bytes);
            let request_id = headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or(&req_id)
                .to_string();
            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%message,
                body_snippet=%snippet,
                "http.error"
            );
            return Err(HttpError::Api {
                status,
                message,
                request_id,
            });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!(
                req_id=%req_id,
                serde_line=%e.line(),
                serde_col=%e.column(),
                serde_err=%e.to_string(),
                body_snippet=%snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }

    // ==============================
    // Core request implementation
    // ==============================

    /// Build, log, and issue a single request. One attempt, no retries.
    async fn request_raw<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: RequestOpts<'_>,
    ) -> Result<(StatusCode, HeaderMap, Vec<u8>, String), HttpError>
    where
        B: Serialize + ?Sized,
    {
        // Resolve URL (allow absolute URL when requested).
        let url = if opts.allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                abs
            } else {
                self.base
                    .join(path)
                    .map_err(|e| HttpError::Url(e.to_string()))?
            }
        } else {
            self.base
                .join(path)
                .map_err(|e| HttpError::Url(e.to_string()))?
        };

        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        rb = rb.timeout(timeout);

        // body (serialize up front so we can log exact bytes)
        let mut request_body_bytes: Option<Vec<u8>> = None;
        if let Some(b) = body {
            let bytes = serde_json::to_vec(b).map_err(|e| HttpError::Build(e.to_string()))?;
            request_body_bytes = Some(bytes.clone());
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        if let Some(auth) = &opts.auth {
            match auth {
                Auth::Bearer(tok) => {
                    let tok = sanitize_api_key(tok)?;
                    rb = rb.bearer_auth(tok);
                }
                Auth::Header { name, value } => {
                    rb = rb.header(name, value);
                }
                Auth::None => {}
            }
        }

        // ----- Safe request logging (pre-send) -----
        let auth_kind = match &opts.auth {
            Some(Auth::Bearer(_)) => "bearer",
            Some(Auth::Header { .. }) => "header",
            Some(Auth::None) | None => "none",
        };

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            timeout_ms=timeout.as_millis() as u64,
            auth_kind,
            has_body=%body.is_some(),
            "http.request.start"
        );

        if raw_enabled() {
            // Only caller-provided headers; auth/cookie values are redacted.
            let mut merged = HeaderMap::new();
            if let Some(h) = &opts.headers {
                for (k, v) in h.iter() {
                    merged.append(k, v.clone());
                }
            }
            let curl = make_curl(&method, &url, &merged, request_body_bytes.as_deref());
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send (exactly once) -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| {
                let message = err.to_string();
                tracing::warn!(req_id=%req_id, message=%message, "http.network_error.body");
                HttpError::Network(message)
            })?
            .to_vec();
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            "http.response"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let mut body_snip = bytes.clone();
            let truncated = body_snip.len() > RAW_MAX_BODY;
            if truncated {
                body_snip.truncate(RAW_MAX_BODY);
            }
            let text = String::from_utf8_lossy(&body_snip);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        Ok((status, headers, bytes, req_id))
    }
}

// ==============================
// Helpers
// ==============================

fn extract_error_message(body: &[u8]) -> String {
    // Slack style: {"ok":false,"error":"..."}; generic: {"message"|"detail"|"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    // 1) Trim outer spaces/quotes
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    // 2) Remove *all* ASCII whitespace (spaces, tabs, newlines, carriage returns)
    s.retain(|ch| !ch.is_ascii_whitespace());

    // 3) Ensure ASCII and no control chars
    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // 4) Validate header value upfront for clear errors
    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_quotes_and_whitespace() {
        let got = sanitize_api_key("  \"xoxb-123\n456\"  ").unwrap();
        assert_eq!(got, "xoxb-123456");
    }

    #[test]
    fn sanitize_rejects_control_chars() {
        assert!(sanitize_api_key("tok\x01en").is_err());
    }

    #[test]
    fn error_message_prefers_slack_error_field() {
        let body = br#"{"ok":false,"error":"channel_not_found"}"#;
        assert_eq!(extract_error_message(body), "channel_not_found");
    }

    #[test]
    fn error_message_falls_back_to_snippet() {
        let body = b"<html>gateway timeout</html>";
        assert_eq!(extract_error_message(body), "<html>gateway timeout</html>");
    }

    #[test]
    fn secret_headers_are_redacted() {
        let mut h = HeaderMap::new();
        h.insert("cookie", HeaderValue::from_static("session=abc"));
        h.insert("accept", HeaderValue::from_static("text/html"));
        let redacted = redact_headers(&h);
        assert!(redacted.contains(&("cookie".into(), "<redacted>".into())));
        assert!(redacted.contains(&("accept".into(), "text/html".into())));
    }
}
