//! Message types
//!
//! Application messages go either to a set of users, parties and tags
//! (`message/send`) or to a group chat (`appchat/send`). The two targets are
//! separate request shapes in `workwx-infra`; this module holds the content
//! and recipient values they share.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::LIST_SEPARATOR;

/// Recipients of an application message.
///
/// Each list is joined with `|` on the wire, keeping its order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecipients {
    /// User IDs (`touser`); `["@all"]` addresses everyone
    pub users: Vec<String>,
    /// Department IDs (`toparty`)
    pub parties: Vec<String>,
    /// Tag IDs (`totag`)
    pub tags: Vec<String>,
}

impl MessageRecipients {
    /// Address the given users
    pub fn users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { users: users.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Address every member visible to the application
    pub fn everyone() -> Self {
        Self::users(["@all"])
    }

    /// Add parties to the recipients
    #[must_use]
    pub fn with_parties<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parties.extend(parties.into_iter().map(Into::into));
        self
    }

    /// Add tags to the recipients
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// `true` if no user, party or tag is addressed
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.parties.is_empty() && self.tags.is_empty()
    }
}

/// Message body, one variant per `msgtype`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text
    Text { content: String },
    /// Markdown subset supported by the client apps
    Markdown { content: String },
    /// Image previously uploaded as temporary media
    Image { media_id: String },
    /// Voice clip previously uploaded as temporary media
    Voice { media_id: String },
    /// File previously uploaded as temporary media
    File { media_id: String },
    /// Card with a link
    TextCard { title: String, description: String, url: String, button_text: Option<String> },
}

impl MessageContent {
    /// Plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text { content: content.into() }
    }

    /// Markdown message
    pub fn markdown(content: impl Into<String>) -> Self {
        Self::Markdown { content: content.into() }
    }

    /// `msgtype` value, also the key the body is stored under
    pub const fn msg_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Markdown { .. } => "markdown",
            Self::Image { .. } => "image",
            Self::Voice { .. } => "voice",
            Self::File { .. } => "file",
            Self::TextCard { .. } => "textcard",
        }
    }

    /// JSON object stored under the `msgtype` key
    pub fn body(&self) -> Value {
        match self {
            Self::Text { content } | Self::Markdown { content } => json!({ "content": content }),
            Self::Image { media_id } | Self::Voice { media_id } | Self::File { media_id } => {
                json!({ "media_id": media_id })
            }
            Self::TextCard { title, description, url, button_text } => {
                let mut card = json!({
                    "title": title,
                    "description": description,
                    "url": url,
                });
                if let (Some(text), Some(map)) = (button_text, card.as_object_mut()) {
                    map.insert("btntxt".to_string(), Value::String(text.clone()));
                }
                card
            }
        }
    }
}

/// Recipients the platform refused to deliver to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSendResult {
    /// Unknown or inaccessible user IDs
    pub invalid_users: Vec<String>,
    /// Unknown or inaccessible department IDs
    pub invalid_parties: Vec<String>,
    /// Unknown or inaccessible tag IDs
    pub invalid_tags: Vec<String>,
}

impl MessageSendResult {
    /// Build from the `|`-joined fields of the send response
    pub fn from_joined(users: &str, parties: &str, tags: &str) -> Self {
        Self {
            invalid_users: split_joined(users),
            invalid_parties: split_joined(parties),
            invalid_tags: split_joined(tags),
        }
    }

    /// `true` if every recipient was accepted
    pub fn is_fully_delivered(&self) -> bool {
        self.invalid_users.is_empty()
            && self.invalid_parties.is_empty()
            && self.invalid_tags.is_empty()
    }
}

fn split_joined(joined: &str) -> Vec<String> {
    joined.split(LIST_SEPARATOR).filter(|part| !part.is_empty()).map(str::to_string).collect()
}
