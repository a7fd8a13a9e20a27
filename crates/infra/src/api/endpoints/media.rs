//! Multipart uploads

use reqwest::Method;
use serde::Deserialize;
use workwx_domain::{ApiResult, Media, MediaType, MediaUploadResult};

use crate::api::endpoint::Endpoint;
use crate::api::request::{QueryParams, RequestShape};

/// `POST /cgi-bin/media/upload`, valid for three days
#[derive(Debug)]
pub struct UploadTempMedia {
    pub media_type: MediaType,
    pub media: Media,
}

impl Endpoint for UploadTempMedia {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/media/upload";

    type Response = MediaUploadResult;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Media {
            params: QueryParams::new().with("type", self.media_type.as_str()),
            media: self.media.clone(),
        })
    }
}

/// `POST /cgi-bin/media/uploadimg`, returns a permanent URL
#[derive(Debug)]
pub struct UploadPermanentImage {
    pub media: Media,
}

#[derive(Debug, Deserialize)]
pub struct ImageUploaded {
    pub url: String,
}

impl Endpoint for UploadPermanentImage {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/cgi-bin/media/uploadimg";

    type Response = ImageUploaded;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Media { params: QueryParams::new(), media: self.media.clone() })
    }
}
