//! Video publishing API
//!
//! The same set of endpoints exists for three hosts, each under its own path
//! prefix. [`VideoApi`] is parameterised by a host marker:
//!
//! | marker          | prefix     |
//! |-----------------|------------|
//! | [`DouyinHost`]  | (none)     |
//! | [`ToutiaoHost`] | `/toutiao` |
//! | [`XiguaHost`]   | `/xigua`   |
//!
//! Deleting a video is only offered by Douyin, so [`VideoApi::delete`] only
//! exists on `VideoApi<DouyinHost>`.
//!
//! All endpoints take `open_id` and `access_token` as query parameters.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::{OpenPlatformResponse, Payload, UploadFile};

use super::{DouyinContext, DouyinCredentials};

mod sealed {
    pub trait Sealed {}
}

/// A platform videos can be published to.
pub trait VideoHost: sealed::Sealed + Send + Sync + 'static {
    /// Path prefix in front of `/video/...`
    const PREFIX: &'static str;
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy)]
pub enum DouyinHost {}

#[derive(Debug, Clone, Copy)]
pub enum ToutiaoHost {}

#[derive(Debug, Clone, Copy)]
pub enum XiguaHost {}

impl sealed::Sealed for DouyinHost {}
impl sealed::Sealed for ToutiaoHost {}
impl sealed::Sealed for XiguaHost {}

impl VideoHost for DouyinHost {
    const PREFIX: &'static str = "";
    const NAME: &'static str = "video";
}

impl VideoHost for ToutiaoHost {
    const PREFIX: &'static str = "/toutiao";
    const NAME: &'static str = "toutiao_video";
}

impl VideoHost for XiguaHost {
    const PREFIX: &'static str = "/xigua";
    const NAME: &'static str = "xigua_video";
}

// Requests

#[derive(Debug, Clone)]
pub struct VideoUploadRequest {
    pub open_id: String,
    pub access_token: String,
    /// Defaults to `<uuid>.mp4`, `video/mp4`
    pub video: UploadFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoPartInitRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct VideoPartUploadRequest {
    pub open_id: String,
    pub access_token: String,
    pub upload_id: String,
    /// 1-based part index
    pub part_number: u32,
    pub video: UploadFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoPartCompleteRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip)]
    pub upload_id: String,
}

/// Publishes a previously uploaded video.
///
/// Host-specific options (`micro_app_info`, `poi_id`, `article_title`, ...)
/// go in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoCreateRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_tsp: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDeleteRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
    pub item_id: String,
}

#[derive(Debug, Clone)]
pub struct VideoListRequest {
    pub open_id: String,
    pub access_token: String,
    pub cursor: i64,
    pub count: u32,
}

impl VideoListRequest {
    pub fn new(open_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            open_id: open_id.into(),
            access_token: access_token.into(),
            cursor: 0,
            count: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDataRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
    pub item_ids: Vec<String>,
}

// Responses

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadedVideo {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoUploadPayload {
    pub video: Option<UploadedVideo>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoPartInitPayload {
    #[serde(default)]
    pub upload_id: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoCreatePayload {
    #[serde(default)]
    pub item_id: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoListPayload {
    #[serde(default)]
    pub list: Vec<Value>,
    #[serde(default)]
    pub cursor: i64,
    #[serde(default)]
    pub has_more: bool,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoDataPayload {
    #[serde(default)]
    pub list: Vec<Value>,
}

pub type VideoUploadResponse = OpenPlatformResponse<VideoUploadPayload>;
pub type VideoPartInitResponse = OpenPlatformResponse<VideoPartInitPayload>;
pub type VideoPartUploadResponse = OpenPlatformResponse<Payload>;
pub type VideoPartCompleteResponse = OpenPlatformResponse<VideoUploadPayload>;
pub type VideoCreateResponse = OpenPlatformResponse<VideoCreatePayload>;
pub type VideoDeleteResponse = OpenPlatformResponse<Payload>;
pub type VideoListResponse = OpenPlatformResponse<VideoListPayload>;
pub type VideoDataResponse = OpenPlatformResponse<VideoDataPayload>;

/// Video API for the host `H`
pub struct VideoApi<H: VideoHost> {
    context: Arc<DouyinContext>,
    _host: PhantomData<fn() -> H>,
}

impl<H: VideoHost> VideoApi<H> {
    pub fn new(context: Arc<DouyinContext>) -> Self {
        Self {
            context,
            _host: PhantomData,
        }
    }

    fn path(tail: &str) -> String {
        format!("{}/video/{tail}", H::PREFIX)
    }

    fn user_request(
        request: ApiRequest,
        open_id: &str,
        access_token: &str,
    ) -> Result<ApiRequest, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", open_id)?;
        ByteDanceError::require_non_empty("access_token", access_token)?;
        Ok(request
            .query("open_id", open_id)
            .query("access_token", access_token))
    }

    /// POST {prefix}/video/upload (multipart)
    pub async fn upload(
        &self,
        request: VideoUploadRequest,
    ) -> Result<VideoUploadResponse, ByteDanceError> {
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("upload")),
            &request.open_id,
            &request.access_token,
        )?;
        let part = request.video.into_part("mp4", "video/mp4")?;
        let form = reqwest::multipart::Form::new().part("video", part);

        self.client().execute(api_request.multipart(form)).await
    }

    /// POST {prefix}/video/part/init
    pub async fn part_init(
        &self,
        request: &VideoPartInitRequest,
    ) -> Result<VideoPartInitResponse, ByteDanceError> {
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("part/init")),
            &request.open_id,
            &request.access_token,
        )?
        .json(request)?;
        self.client().execute(api_request).await
    }

    /// POST {prefix}/video/part/upload (multipart)
    pub async fn part_upload(
        &self,
        request: VideoPartUploadRequest,
    ) -> Result<VideoPartUploadResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("upload_id", &request.upload_id)?;
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("part/upload")),
            &request.open_id,
            &request.access_token,
        )?
        .query("upload_id", &request.upload_id)
        .query("part_number", request.part_number);
        let part = request.video.into_part("mp4", "video/mp4")?;
        let form = reqwest::multipart::Form::new().part("video", part);

        self.client().execute(api_request.multipart(form)).await
    }

    /// POST {prefix}/video/part/complete
    pub async fn part_complete(
        &self,
        request: &VideoPartCompleteRequest,
    ) -> Result<VideoPartCompleteResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("upload_id", &request.upload_id)?;
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("part/complete")),
            &request.open_id,
            &request.access_token,
        )?
        .query("upload_id", &request.upload_id)
        .json(request)?;
        self.client().execute(api_request).await
    }

    /// POST {prefix}/video/create
    pub async fn create(
        &self,
        request: &VideoCreateRequest,
    ) -> Result<VideoCreateResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("video_id", &request.video_id)?;
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("create")),
            &request.open_id,
            &request.access_token,
        )?
        .json(request)?;
        self.client().execute(api_request).await
    }

    /// GET {prefix}/video/list
    pub async fn list(
        &self,
        request: &VideoListRequest,
    ) -> Result<VideoListResponse, ByteDanceError> {
        let api_request = Self::user_request(
            ApiRequest::get(Self::path("list")),
            &request.open_id,
            &request.access_token,
        )?
        .query("cursor", request.cursor)
        .query("count", request.count);
        self.client().execute(api_request).await
    }

    /// POST {prefix}/video/data
    pub async fn data(
        &self,
        request: &VideoDataRequest,
    ) -> Result<VideoDataResponse, ByteDanceError> {
        if request.item_ids.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "item_ids must not be empty".to_string(),
            ));
        }
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("data")),
            &request.open_id,
            &request.access_token,
        )?
        .json(request)?;
        self.client().execute(api_request).await
    }
}

impl VideoApi<DouyinHost> {
    /// POST /video/delete
    pub async fn delete(
        &self,
        request: &VideoDeleteRequest,
    ) -> Result<VideoDeleteResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("item_id", &request.item_id)?;
        let api_request = Self::user_request(
            ApiRequest::post(Self::path("delete")),
            &request.open_id,
            &request.access_token,
        )?
        .json(request)?;
        self.client().execute(api_request).await
    }
}

impl<H: VideoHost> ByteDanceApi for VideoApi<H> {
    type Credentials = DouyinCredentials;

    fn context(&self) -> &DouyinContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        H::NAME
    }
}
