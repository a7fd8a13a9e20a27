//! Member and department types
//!
//! Fields mirror the platform's JSON names; absent fields decode to their
//! defaults because visibility rules hide different fields per application.

use serde::{Deserialize, Serialize};

/// Member details from `user/get` and `user/list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDetail {
    #[serde(rename = "userid")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "department")]
    pub dept_ids: Vec<i64>,
    #[serde(rename = "order")]
    pub dept_order: Vec<u32>,
    pub position: String,
    pub mobile: String,
    pub gender: String,
    pub email: String,
    pub is_leader_in_dept: Vec<i32>,
    #[serde(rename = "avatar")]
    pub avatar_url: String,
    pub telephone: String,
    #[serde(rename = "enable")]
    pub enabled: i32,
    pub alias: String,
    /// 1 active, 2 disabled, 4 not yet activated, 5 left the corp
    pub status: i32,
    #[serde(rename = "qr_code")]
    pub qr_code_url: String,
}

impl UserDetail {
    /// `true` if the account is enabled
    pub const fn is_enabled(&self) -> bool {
        self.enabled == 1
    }
}

/// Department entry from `department/list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeptInfo {
    pub id: i64,
    pub name: String,
    #[serde(rename = "parentid")]
    pub parent_id: i64,
    pub order: u32,
}

/// Visitor identity resolved from an OAuth `code`
///
/// Members carry a `UserId`; non-members carry an `OpenId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserIdentityInfo {
    #[serde(rename = "UserId", alias = "userid")]
    pub user_id: String,
    #[serde(rename = "OpenId", alias = "openid")]
    pub open_id: String,
    #[serde(rename = "DeviceId", alias = "deviceid")]
    pub device_id: String,
}

impl UserIdentityInfo {
    /// `true` if the visitor is a member of the corp
    pub fn is_member(&self) -> bool {
        !self.user_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_detail_tolerates_missing_fields() {
        let user: UserDetail = serde_json::from_str(
            r#"{"userid":"zhangsan","name":"Zhang","department":[1,2],"enable":1,"extra":true}"#,
        )
        .unwrap();

        assert_eq!(user.user_id, "zhangsan");
        assert_eq!(user.dept_ids, vec![1, 2]);
        assert!(user.is_enabled());
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_identity_accepts_both_casings() {
        let member: UserIdentityInfo =
            serde_json::from_str(r#"{"UserId":"zhangsan","DeviceId":"d1"}"#).unwrap();
        let visitor: UserIdentityInfo = serde_json::from_str(r#"{"openid":"o-123"}"#).unwrap();

        assert!(member.is_member());
        assert_eq!(member.device_id, "d1");
        assert!(!visitor.is_member());
        assert_eq!(visitor.open_id, "o-123");
    }
}
