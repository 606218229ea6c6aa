//! Block Kit message model.
//!
//! Serde derives are shaped so serialization is exactly the wire format Slack
//! expects; the formatter builds these and the client posts them untouched.

use serde::{Deserialize, Serialize};

/// One structured segment of the outgoing message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBlock {
    Header { text: TextObject },
    Section { text: TextObject },
    Context { elements: Vec<TextObject> },
    Divider,
}

impl MessageBlock {
    /// Header block; Slack only accepts `plain_text` here.
    pub fn header(text: impl Into<String>) -> Self {
        MessageBlock::Header {
            text: TextObject::plain(text),
        }
    }

    /// Section block with mrkdwn body.
    pub fn section(text: impl Into<String>) -> Self {
        MessageBlock::Section {
            text: TextObject::mrkdwn(text),
        }
    }

    /// Context block with one plain-text element per entry.
    pub fn context<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        MessageBlock::Context {
            elements: elements.into_iter().map(TextObject::plain).collect(),
        }
    }

    pub fn divider() -> Self {
        MessageBlock::Divider
    }
}

/// Block Kit text object, either `plain_text` or `mrkdwn`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }
}

/// Body for `chat.postMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    /// Plain-text notification fallback for clients that don't render blocks.
    pub text: &'a str,
    pub blocks: &'a [MessageBlock],
}

/// Envelope Slack returns for `chat.postMessage`. HTTP status is 200 even on
/// rejection; `ok` is the real verdict.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}
