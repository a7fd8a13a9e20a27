//! Group chat created by an application

use serde::{Deserialize, Serialize};

/// Group chat details, used both to create and to read a chat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatInfo {
    /// Chat ID; left empty on creation to let the platform assign one
    #[serde(rename = "chatid", skip_serializing_if = "String::is_empty")]
    pub chat_id: String,
    pub name: String,
    /// Owner user ID; a random member is chosen when empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(rename = "userlist")]
    pub member_user_ids: Vec<String>,
}
