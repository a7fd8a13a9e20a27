//! Member tags

use serde::{Deserialize, Serialize};

/// A member tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag ID; `None` lets the platform assign one on creation
    #[serde(rename = "tagid", skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    /// Display name, unique within the corp
    #[serde(rename = "tagname")]
    pub tag_name: String,
}

impl Tag {
    /// Tag with a platform-assigned ID
    pub fn named(tag_name: impl Into<String>) -> Self {
        Self { tag_id: None, tag_name: tag_name.into() }
    }

    /// Tag with an explicit ID
    pub fn with_id(tag_id: i64, tag_name: impl Into<String>) -> Self {
        Self { tag_id: Some(tag_id), tag_name: tag_name.into() }
    }
}
