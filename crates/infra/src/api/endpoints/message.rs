//! `message/send` and `appchat/send`

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use workwx_domain::{ApiError, ApiResult, MessageContent, MessageRecipients, MessageSendResult};

use crate::api::endpoint::Endpoint;
use crate::api::request::{join_list, RequestShape};

/// Application message to users, parties and tags
#[derive(Debug)]
pub struct SendMessage<'a> {
    pub agent_id: i64,
    pub recipients: &'a MessageRecipients,
    pub content: &'a MessageContent,
    pub safe: bool,
}

/// Application message to a group chat
#[derive(Debug)]
pub struct SendAppchatMessage<'a> {
    pub chat_id: &'a str,
    pub content: &'a MessageContent,
    pub safe: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendMessageResponse {
    #[serde(rename = "invaliduser")]
    pub invalid_user: String,
    #[serde(rename = "invalidparty")]
    pub invalid_party: String,
    #[serde(rename = "invalidtag")]
    pub invalid_tag: String,
}

impl From<SendMessageResponse> for MessageSendResult {
    fn from(response: SendMessageResponse) -> Self {
        Self::from_joined(&response.invalid_user, &response.invalid_party, &response.invalid_tag)
    }
}

fn message_body(content: &MessageContent, safe: bool) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("msgtype".to_string(), Value::from(content.msg_type()));
    body.insert(content.msg_type().to_string(), content.body());
    body.insert("safe".to_string(), Value::from(u8::from(safe)));
    body
}

impl Endpoint for SendMessage<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/message/send";

    type Response = SendMessageResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        if self.recipients.is_empty() {
            return Err(ApiError::Config("message has no recipients".into()));
        }

        let mut body = message_body(self.content, self.safe);
        body.insert("agentid".to_string(), Value::from(self.agent_id));
        body.insert("touser".to_string(), Value::from(join_list(&self.recipients.users)));
        body.insert("toparty".to_string(), Value::from(join_list(&self.recipients.parties)));
        body.insert("totag".to_string(), Value::from(join_list(&self.recipients.tags)));
        Ok(RequestShape::Json(Value::Object(body)))
    }
}

impl Endpoint for SendAppchatMessage<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/appchat/send";

    type Response = SendMessageResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        let mut body = message_body(self.content, self.safe);
        body.insert("chatid".to_string(), Value::from(self.chat_id));
        Ok(RequestShape::Json(Value::Object(body)))
    }
}
