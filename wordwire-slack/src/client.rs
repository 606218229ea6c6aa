//! Minimal wrapper around the Slack Web API with wordwire defaults.
//!
//! Handles bearer auth and the `ok:false` rejection envelope before
//! delegating to the shared HTTP client. The caller logs the outcome and
//! never retries.

use thiserror::Error;
use wordwire_http::{Auth, HttpClient, HttpError, RequestOpts};

use crate::types::{MessageBlock, PostMessageRequest, PostMessageResponse};

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("transport failure talking to Slack: {0}")]
    Transport(#[from] HttpError),
    #[error("slack rejected the credentials: {code}")]
    Auth { code: String },
    #[error("slack refused the message: {code}")]
    Delivery { code: String },
}

#[derive(Clone)]
pub struct SlackApi {
    http: HttpClient,
    bearer: String,
}

impl SlackApi {
    pub fn new(bot_token: String) -> Self {
        let http = HttpClient::new("https://slack.com/api/").expect("slack base url");
        Self {
            http,
            bearer: bot_token,
        }
    }

    /// Post one message to `channel`. The blocks are sent exactly as given.
    pub async fn post_message(
        &self,
        channel: &str,
        notify_text: &str,
        blocks: &[MessageBlock],
    ) -> Result<PostMessageResponse, SlackError> {
        let req = PostMessageRequest {
            channel,
            text: notify_text,
            blocks,
        };

        let resp: PostMessageResponse = self
            .http
            .post_json(
                "chat.postMessage",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.bearer)),
                    ..Default::default()
                },
            )
            .await
            .map_err(classify_transport)?;

        if !resp.ok {
            let code = resp.error.unwrap_or_else(|| "unknown_error".into());
            tracing::warn!(channel = %channel, code = %code, "slack.post_message.rejected");
            return Err(classify_rejection(code));
        }

        tracing::debug!(
            channel = %channel,
            ts = ?resp.ts,
            block_count = blocks.len(),
            "slack.post_message.ok"
        );
        Ok(resp)
    }
}

/// HTTP-level 401/403 are credential problems; everything else stays a
/// transport error.
fn classify_transport(err: HttpError) -> SlackError {
    match &err {
        HttpError::Api { status, message, .. }
            if status.as_u16() == 401 || status.as_u16() == 403 =>
        {
            SlackError::Auth {
                code: message.clone(),
            }
        }
        _ => SlackError::Transport(err),
    }
}

/// Map Slack's `ok:false` error codes onto the auth/delivery split.
fn classify_rejection(code: String) -> SlackError {
    match code.as_str() {
        "invalid_auth" | "not_authed" | "token_revoked" | "account_inactive" => {
            SlackError::Auth { code }
        }
        _ => SlackError::Delivery { code },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_codes_map_to_auth_errors() {
        for code in ["invalid_auth", "not_authed", "token_revoked", "account_inactive"] {
            assert!(matches!(
                classify_rejection(code.to_string()),
                SlackError::Auth { .. }
            ));
        }
    }

    #[test]
    fn other_codes_are_delivery_errors() {
        assert!(matches!(
            classify_rejection("channel_not_found".to_string()),
            SlackError::Delivery { code } if code == "channel_not_found"
        ));
    }

    #[test]
    fn http_unauthorized_maps_to_auth() {
        let err = HttpError::Api {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "invalid token".into(),
            request_id: "-".into(),
        };
        assert!(matches!(classify_transport(err), SlackError::Auth { .. }));
    }

    #[test]
    fn network_failures_stay_transport() {
        let err = HttpError::Network("connection reset".into());
        assert!(matches!(
            classify_transport(err),
            SlackError::Transport(_)
        ));
    }
}
