//! External contacts and the corp customer-tag library

use reqwest::Method;
use serde::{Deserialize, Serialize};
use workwx_domain::{ApiResult, CorpTagGroup, ExternalContactInfo, ExternalContactRemark};

use crate::api::endpoint::Endpoint;
use crate::api::request::{QueryParams, RequestShape};
use crate::api::response::Acknowledged;

/// `GET /cgi-bin/externalcontact/list`
#[derive(Debug)]
pub struct ListExternalContacts<'a> {
    pub user_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExternalContactListResponse {
    #[serde(rename = "external_userid")]
    pub external_user_ids: Vec<String>,
}

impl Endpoint for ListExternalContacts<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/externalcontact/list";

    type Response = ExternalContactListResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("userid", self.user_id)))
    }
}

/// `GET /cgi-bin/externalcontact/get`
#[derive(Debug)]
pub struct GetExternalContact<'a> {
    pub external_user_id: &'a str,
}

impl Endpoint for GetExternalContact<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/externalcontact/get";

    type Response = ExternalContactInfo;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("external_userid", self.external_user_id)))
    }
}

/// `POST /cgi-bin/externalcontact/remark`
#[derive(Debug)]
pub struct RemarkExternalContact<'a> {
    pub remark: &'a ExternalContactRemark,
}

impl Endpoint for RemarkExternalContact<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/remark";

    type Response = Acknowledged;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self.remark)
    }
}

/// `POST /cgi-bin/externalcontact/get_corp_tag_list`; empty `tag_ids` lists
/// the whole library
#[derive(Debug, Serialize)]
pub struct ListCorpTags<'a> {
    #[serde(rename = "tag_id")]
    pub tag_ids: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CorpTagGroupsResponse {
    pub tag_group: Vec<CorpTagGroup>,
}

impl Endpoint for ListCorpTags<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/get_corp_tag_list";

    type Response = CorpTagGroupsResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}

/// `POST /cgi-bin/externalcontact/add_corp_tag`
#[derive(Debug)]
pub struct AddCorpTag<'a> {
    pub group: &'a CorpTagGroup,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CorpTagGroupResponse {
    pub tag_group: CorpTagGroup,
}

impl Endpoint for AddCorpTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/add_corp_tag";

    type Response = CorpTagGroupResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self.group)
    }
}

/// `POST /cgi-bin/externalcontact/edit_corp_tag`; `id` may name a tag or a
/// group
#[derive(Debug, Serialize)]
pub struct EditCorpTag<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub order: u32,
}

impl Endpoint for EditCorpTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/edit_corp_tag";

    type Response = Acknowledged;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}

/// `POST /cgi-bin/externalcontact/del_corp_tag`
#[derive(Debug, Serialize)]
pub struct DelCorpTag<'a> {
    pub tag_id: &'a [String],
    pub group_id: &'a [String],
}

impl Endpoint for DelCorpTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/del_corp_tag";

    type Response = Acknowledged;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}

/// `POST /cgi-bin/externalcontact/mark_tag`
#[derive(Debug, Serialize)]
pub struct MarkExternalContactTag<'a> {
    #[serde(rename = "userid")]
    pub user_id: &'a str,
    #[serde(rename = "external_userid")]
    pub external_user_id: &'a str,
    pub add_tag: &'a [String],
    pub remove_tag: &'a [String],
}

impl Endpoint for MarkExternalContactTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/externalcontact/mark_tag";

    type Response = Acknowledged;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}
