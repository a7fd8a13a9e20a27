//! `GET /cgi-bin/department/list`

use reqwest::Method;
use serde::Deserialize;
use workwx_domain::{ApiResult, DeptInfo};

use crate::api::endpoint::Endpoint;
use crate::api::request::{QueryParams, RequestShape};

/// List a department and its sub-departments, or every department
#[derive(Debug, Default)]
pub struct ListDepts {
    pub id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeptListResponse {
    #[serde(rename = "department")]
    pub departments: Vec<DeptInfo>,
}

impl Endpoint for ListDepts {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/department/list";

    type Response = DeptListResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        let mut params = QueryParams::new();
        if let Some(id) = self.id {
            params.push("id", id.to_string());
        }
        Ok(RequestShape::Query(params))
    }
}
