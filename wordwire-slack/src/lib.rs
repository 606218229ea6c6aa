//! Slack Web API surface used by wordwire.
//!
//! Submodules provide the HTTP client wrapper and the Block Kit message
//! model. Only `chat.postMessage` is wrapped; the bot never reads from Slack.

pub mod client;
pub mod types;

pub use client::{SlackApi, SlackError};
pub use types::{MessageBlock, PostMessageRequest, PostMessageResponse, TextObject};
