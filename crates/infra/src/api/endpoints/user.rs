//! Member lookups

use reqwest::Method;
use serde::{Deserialize, Serialize};
use workwx_domain::{ApiResult, UserDetail, UserIdentityInfo};

use crate::api::endpoint::Endpoint;
use crate::api::request::{QueryParams, RequestShape};

/// `GET /cgi-bin/user/get`
#[derive(Debug)]
pub struct GetUser<'a> {
    pub user_id: &'a str,
}

impl Endpoint for GetUser<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/user/get";

    type Response = UserDetail;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("userid", self.user_id)))
    }
}

/// `GET /cgi-bin/user/list`
#[derive(Debug)]
pub struct ListUsersByDept {
    pub dept_id: i64,
    pub fetch_child: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserListResponse {
    #[serde(rename = "userlist")]
    pub users: Vec<UserDetail>,
}

impl Endpoint for ListUsersByDept {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/user/list";

    type Response = UserListResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        let mut params = QueryParams::new().with("department_id", self.dept_id.to_string());
        params.push_flag("fetch_child", self.fetch_child);
        Ok(RequestShape::Query(params))
    }
}

/// `POST /cgi-bin/user/getuserid`
#[derive(Debug, Serialize)]
pub struct GetUserIdByMobile<'a> {
    pub mobile: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UserIdResponse {
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl Endpoint for GetUserIdByMobile<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/user/getuserid";

    type Response = UserIdResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}

/// `GET /cgi-bin/user/getuserinfo`
#[derive(Debug)]
pub struct GetUserInfoByCode<'a> {
    pub code: &'a str,
}

impl Endpoint for GetUserInfoByCode<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/user/getuserinfo";

    type Response = UserIdentityInfo;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("code", self.code)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::endpoints::test_support::{json_of, query_of};

    #[test]
    fn list_users_encodes_fetch_child_flag() {
        assert_eq!(
            query_of(&ListUsersByDept { dept_id: 2, fetch_child: true }),
            "access_token=t&department_id=2&fetch_child=1"
        );
        assert_eq!(
            query_of(&ListUsersByDept { dept_id: 2, fetch_child: false }),
            "access_token=t&department_id=2&fetch_child=0"
        );
    }

    #[test]
    fn mobile_lookup_is_json() {
        assert_eq!(
            json_of(&GetUserIdByMobile { mobile: "13800000000" }),
            json!({"mobile": "13800000000"})
        );
    }

    #[test]
    fn user_queries_carry_identifier() {
        assert_eq!(query_of(&GetUser { user_id: "zhangsan" }), "access_token=t&userid=zhangsan");
        assert_eq!(query_of(&GetUserInfoByCode { code: "abc" }), "access_token=t&code=abc");
    }

    #[test]
    fn user_list_response_decodes() {
        let response: UserListResponse = serde_json::from_value(json!({
            "userlist": [{"userid": "zhangsan", "name": "Zhang San", "department": [1, 2]}]
        }))
        .unwrap();

        assert_eq!(response.users.len(), 1);
        assert_eq!(response.users[0].dept_ids, vec![1, 2]);
    }
}
