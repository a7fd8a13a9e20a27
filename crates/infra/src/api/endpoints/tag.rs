//! Member tags

use reqwest::Method;
use serde::Deserialize;
use workwx_domain::{ApiResult, Tag};

use crate::api::endpoint::Endpoint;
use crate::api::request::RequestShape;
use crate::api::response::Acknowledged;

/// `POST /cgi-bin/tag/create`; the ID may be left for the platform to pick
#[derive(Debug)]
pub struct CreateTag<'a> {
    pub tag: &'a Tag,
}

#[derive(Debug, Deserialize)]
pub struct TagCreated {
    #[serde(rename = "tagid")]
    pub tag_id: i64,
}

impl Endpoint for CreateTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/tag/create";

    type Response = TagCreated;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self.tag)
    }
}

/// `POST /cgi-bin/tag/update`; both fields are required
#[derive(Debug, serde::Serialize)]
pub struct UpdateTag<'a> {
    #[serde(rename = "tagid")]
    pub tag_id: i64,
    #[serde(rename = "tagname")]
    pub tag_name: &'a str,
}

impl Endpoint for UpdateTag<'_> {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/tag/update";

    type Response = Acknowledged;

    fn shape(&self) -> ApiResult<RequestShape> {
        RequestShape::json(self)
    }
}
