//! External contact (customer) types

use serde::{Deserialize, Serialize};

/// Basic profile of an external contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalContact {
    #[serde(rename = "external_userid")]
    pub external_user_id: String,
    pub name: String,
    pub position: String,
    pub avatar: String,
    pub corp_name: String,
    pub corp_full_name: String,
    /// 1 WeChat user, 2 WeCom user
    #[serde(rename = "type")]
    pub contact_type: i32,
    /// 0 unknown, 1 male, 2 female
    pub gender: i32,
    #[serde(rename = "unionid")]
    pub union_id: String,
}

/// Tag a member attached to an external contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUserTag {
    pub group_name: String,
    pub tag_name: String,
    pub tag_id: String,
    /// 1 corp tag, 2 personal tag, 3 rule-group tag
    #[serde(rename = "type")]
    pub tag_type: i32,
}

/// A member who added the external contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUser {
    #[serde(rename = "userid")]
    pub user_id: String,
    pub remark: String,
    pub description: String,
    #[serde(rename = "createtime")]
    pub create_time: i64,
    pub tags: Vec<FollowUserTag>,
    pub remark_corp_name: String,
    pub remark_mobiles: Vec<String>,
    pub add_way: i32,
    pub state: String,
}

/// External contact with the members following it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalContactInfo {
    pub external_contact: ExternalContact,
    pub follow_user: Vec<FollowUser>,
}

/// Remark a member keeps about an external contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalContactRemark {
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "external_userid")]
    pub external_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark_mobiles: Option<Vec<String>>,
    #[serde(rename = "remark_pic_mediaid", skip_serializing_if = "Option::is_none")]
    pub remark_pic_media_id: Option<String>,
}

/// A tag in the corp customer-tag library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpTag {
    /// Assigned by the platform; omitted when creating
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub create_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing)]
    pub deleted: bool,
}

/// A group of customer tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpTagGroup {
    /// Existing group to add tags to; empty creates `group_name`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_name: String,
    #[serde(skip_serializing)]
    pub create_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing)]
    pub deleted: bool,
    #[serde(rename = "tag")]
    pub tags: Vec<CorpTag>,
}
