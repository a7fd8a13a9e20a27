//! Group chats owned by the application

use reqwest::Method;
use serde::Deserialize;
use workwx_domain::{ApiResult, ChatInfo};

use crate::api::endpoint::Endpoint;
use crate::api::request::{QueryParams, RequestShape};

/// `GET /cgi-bin/appchat/get`
#[derive(Debug)]
pub struct GetAppchat<'a> {
    pub chat_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AppchatResponse {
    pub chat_info: ChatInfo,
}

impl Endpoint for GetAppchat<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/appchat/get";

    type Response = AppchatResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("chatid", self.chat_id)))
    }
}

/// `POST /cgi-bin/appchat/create`
#[derive(Debug)]
pub struct CreateAppchat<'a> {
    pub chat: &'a ChatInfo,
}

#[derive(Debug, Deserialize)]
pub struct AppchatCreated {
    #[serde(rename = "chatid")]
    pub chat_id: String,
}

impl Endpoint for CreateAppchat<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/appchat/create";

    type Response = AppchatCreated;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self.chat)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::endpoints::test_support::{json_of, query_of};

    #[test]
    fn create_sends_chat_info() {
        let chat = ChatInfo {
            chat_id: "release".into(),
            name: "Release".into(),
            owner: "zhangsan".into(),
            member_user_ids: vec!["zhangsan".into(), "lisi".into()],
        };

        assert_eq!(
            json_of(&CreateAppchat { chat: &chat }),
            json!({
                "chatid": "release",
                "name": "Release",
                "owner": "zhangsan",
                "userlist": ["zhangsan", "lisi"]
            })
        );
    }

    #[test]
    fn get_queries_chat_id() {
        assert_eq!(query_of(&GetAppchat { chat_id: "release" }), "access_token=t&chatid=release");
    }
}
