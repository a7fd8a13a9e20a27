//! Wire shapes of individual endpoints against a mock platform

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer};
use workwx_domain::{
    ApiError, ChatInfo, CorpTag, CorpTagGroup, Media, MediaType, MessageContent,
    MessageRecipients, Tag,
};

use support::{app_for, mount_token, ok_json, platform_error, AGENT_ID};

#[tokio::test]
async fn add_tag_returns_assigned_id() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/tag/create"))
        .and(query_param("access_token", "tok-1"))
        .and(body_json(json!({"tagid": 1, "tagname": "bar"})))
        .respond_with(ok_json(json!({"tagid": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let tag_id = app_for(&server).add_tag(&Tag::with_id(1, "bar")).await.unwrap();

    assert_eq!(tag_id, 7);
}

#[tokio::test]
async fn update_tag_sends_id_and_name() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/tag/update"))
        .and(body_json(json!({"tagid": 7, "tagname": "baz"})))
        .respond_with(ok_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server).update_tag(7, "baz").await.unwrap();
}

#[tokio::test]
async fn text_message_reports_invalid_recipients() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/message/send"))
        .and(body_json(json!({
            "msgtype": "text",
            "text": {"content": "deploy finished"},
            "safe": 0,
            "agentid": AGENT_ID,
            "touser": "zhangsan|ghost",
            "toparty": "",
            "totag": ""
        })))
        .respond_with(ok_json(json!({
            "invaliduser": "ghost",
            "invalidparty": "",
            "invalidtag": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let recipients = MessageRecipients::users(["zhangsan", "ghost"]);
    let result =
        app_for(&server).send_text_message(&recipients, "deploy finished", false).await.unwrap();

    assert_eq!(result.invalid_users, vec!["ghost"]);
    assert!(!result.is_fully_delivered());
}

#[tokio::test]
async fn message_without_recipients_never_reaches_platform() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 0).await;
    Mock::given(path("/cgi-bin/message/send"))
        .respond_with(ok_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = app_for(&server)
        .send_text_message(&MessageRecipients::default(), "nobody", false)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Config(_)));
}

#[tokio::test]
async fn appchat_message_targets_chat() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/appchat/send"))
        .and(body_json(json!({
            "msgtype": "markdown",
            "markdown": {"content": "**ok**"},
            "safe": 1,
            "chatid": "release"
        })))
        .respond_with(ok_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    app_for(&server)
        .send_appchat_message("release", &MessageContent::markdown("**ok**"), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn temp_media_upload_is_multipart() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/media/upload"))
        .and(query_param("type", "file"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="media"; filename="report.txt""#))
        .and(body_string_contains("quarterly numbers"))
        .respond_with(ok_json(json!({
            "type": "file",
            "media_id": "1G6nrLmr5EC3MMb_-zK1dDdzmd0p7cNliYu9V5w7o8K0",
            "created_at": "1380000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let media = Media::from_bytes("report.txt", Bytes::from_static(b"quarterly numbers"))
        .with_content_type("text/plain");
    let uploaded = app_for(&server).upload_temp_media(MediaType::File, media).await.unwrap();

    assert_eq!(uploaded.media_type, "file");
    assert!(uploaded.created_at_utc().is_some());
}

#[tokio::test]
async fn media_upload_is_retried_with_same_payload() {
    let server = MockServer::start().await;
    support::mount_token_sequence(&server, "tok-1", "tok-2").await;
    Mock::given(path("/cgi-bin/media/uploadimg"))
        .and(query_param("access_token", "tok-1"))
        .respond_with(platform_error(42001, "access_token expired"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/media/uploadimg"))
        .and(query_param("access_token", "tok-2"))
        .and(body_string_contains("PNGDATA"))
        .respond_with(ok_json(json!({"url": "https://wework.qpic.cn/abc/0"})))
        .expect(1)
        .mount(&server)
        .await;

    let media = Media::from_bytes("logo.png", Bytes::from_static(b"PNGDATA"));
    let url = app_for(&server).upload_permanent_image(media).await.unwrap();

    assert_eq!(url, "https://wework.qpic.cn/abc/0");
}

#[tokio::test]
async fn department_listing_with_and_without_id() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(path("/cgi-bin/department/list"))
        .and(query_param("id", "2"))
        .respond_with(ok_json(json!({
            "department": [{"id": 2, "name": "R&D", "parentid": 1, "order": 10}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/department/list"))
        .respond_with(ok_json(json!({"department": [
            {"id": 1, "name": "Corp", "parentid": 0, "order": 1},
            {"id": 2, "name": "R&D", "parentid": 1, "order": 10}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);

    let subtree = app.list_depts(2).await.unwrap();
    assert_eq!(subtree.len(), 1);
    assert_eq!(subtree[0].parent_id, 1);

    let all = app.list_all_depts().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn user_lookups() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(path("/cgi-bin/user/list"))
        .and(query_param("department_id", "1"))
        .and(query_param("fetch_child", "1"))
        .respond_with(ok_json(json!({"userlist": [{"userid": "zhangsan"}, {"userid": "lisi"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/user/getuserid"))
        .and(body_json(json!({"mobile": "13800000000"})))
        .respond_with(ok_json(json!({"userid": "zhangsan"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/user/getuserinfo"))
        .and(query_param("code", "oauth-code"))
        .respond_with(ok_json(json!({"UserId": "zhangsan", "DeviceId": "dev-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);

    let users = app.list_users_by_dept(1, true).await.unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["zhangsan", "lisi"]);
    assert_eq!(app.get_user_id_by_mobile("13800000000").await.unwrap(), "zhangsan");

    let visitor = app.get_user_info_by_code("oauth-code").await.unwrap();
    assert!(visitor.is_member());
    assert_eq!(visitor.device_id, "dev-1");
}

#[tokio::test]
async fn appchat_create_and_get() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path("/cgi-bin/appchat/create"))
        .and(body_json(json!({"name": "release", "userlist": ["zhangsan", "lisi"]})))
        .respond_with(ok_json(json!({"chatid": "CHAT42"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/appchat/get"))
        .and(query_param("chatid", "CHAT42"))
        .respond_with(ok_json(json!({"chat_info": {
            "chatid": "CHAT42",
            "name": "release",
            "owner": "zhangsan",
            "userlist": ["zhangsan", "lisi"]
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let chat = ChatInfo {
        name: "release".into(),
        member_user_ids: vec!["zhangsan".into(), "lisi".into()],
        ..ChatInfo::default()
    };

    let chat_id = app.create_appchat(&chat).await.unwrap();
    let fetched = app.get_appchat(&chat_id).await.unwrap();

    assert_eq!(fetched.owner, "zhangsan");
    assert_eq!(fetched.member_user_ids.len(), 2);
}

#[tokio::test]
async fn external_contact_flow() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(path("/cgi-bin/externalcontact/list"))
        .and(query_param("userid", "zhangsan"))
        .respond_with(ok_json(json!({"external_userid": ["wmA", "wmB"]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/externalcontact/get"))
        .and(query_param("external_userid", "wmA"))
        .respond_with(ok_json(json!({
            "external_contact": {"external_userid": "wmA", "name": "Li", "type": 1},
            "follow_user": [{"userid": "zhangsan", "remark": "vip"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/externalcontact/mark_tag"))
        .and(body_json(json!({
            "userid": "zhangsan",
            "external_userid": "wmA",
            "add_tag": ["et1"],
            "remove_tag": []
        })))
        .respond_with(ok_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);

    let contacts = app.list_external_contacts("zhangsan").await.unwrap();
    assert_eq!(contacts, vec!["wmA", "wmB"]);

    let info = app.get_external_contact("wmA").await.unwrap();
    assert_eq!(info.external_contact.name, "Li");
    assert_eq!(info.follow_user[0].remark, "vip");

    app.mark_external_contact_tag("zhangsan", "wmA", &["et1".to_string()], &[]).await.unwrap();
}

#[tokio::test]
async fn corp_tag_library() {
    let server = MockServer::start().await;
    mount_token(&server, "tok-1", 1).await;
    Mock::given(path("/cgi-bin/externalcontact/get_corp_tag_list"))
        .and(body_json(json!({"tag_id": []})))
        .respond_with(ok_json(json!({"tag_group": [{
            "group_id": "g1",
            "group_name": "level",
            "create_time": 1_557_838_797,
            "order": 1,
            "deleted": false,
            "tag": [{"id": "et1", "name": "gold", "create_time": 1_557_838_797, "order": 1}]
        }]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/externalcontact/add_corp_tag"))
        .and(body_json(json!({"group_id": "g1", "tag": [{"name": "silver"}]})))
        .respond_with(ok_json(json!({"tag_group": {
            "group_id": "g1",
            "group_name": "level",
            "tag": [{"id": "et2", "name": "silver"}]
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/externalcontact/edit_corp_tag"))
        .and(body_json(json!({"id": "et2", "name": "platinum", "order": 3})))
        .respond_with(ok_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/cgi-bin/externalcontact/del_corp_tag"))
        .and(body_json(json!({"tag_id": ["et2"], "group_id": []})))
        .respond_with(ok_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);

    let groups = app.list_corp_tags(&[]).await.unwrap();
    assert_eq!(groups[0].tags[0].name, "gold");

    let request = CorpTagGroup {
        group_id: "g1".into(),
        tags: vec![CorpTag { name: "silver".into(), ..CorpTag::default() }],
        ..CorpTagGroup::default()
    };
    let created = app.add_corp_tag(&request).await.unwrap();
    assert_eq!(created.tags[0].id, "et2");

    app.edit_corp_tag("et2", "platinum", 3).await.unwrap();
    app.del_corp_tag(&["et2".to_string()], &[]).await.unwrap();
}
