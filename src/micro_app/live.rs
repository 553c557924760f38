//! Live room API

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::{MicroAppResponse, UploadFile};

use super::{MicroAppContext, MicroAppCredentials};

pub type LiveResponse = MicroAppResponse<Value>;

/// Multipart upload of a live room cover image.
#[derive(Debug, Clone)]
pub struct UploadLiveImageRequest {
    pub image: UploadFile,
    pub title: String,
    pub start_page: String,
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetBlackWhiteListRequest {
    /// Sent both in the body and as the `access-token` header
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct LiveApi {
    context: Arc<MicroAppContext>,
}

impl LiveApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /apps/upload_live_image (multipart)
    pub async fn upload_live_image(
        &self,
        request: UploadLiveImageRequest,
    ) -> Result<LiveResponse, ByteDanceError> {
        let part = request.image.into_part("jpg", "image/jpeg")?;
        let mut form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("title", request.title)
            .text("start_page", request.start_page);
        if let Some(room_id) = request.room_id {
            form = form.text("room_id", room_id);
        }

        let request = ApiRequest::post("/apps/upload_live_image").multipart(form);
        self.client().execute(request).await
    }

    /// POST /apps/v1/live/set_black_white_list
    pub async fn set_black_white_list(
        &self,
        request: &SetBlackWhiteListRequest,
    ) -> Result<LiveResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", &request.access_token)?;
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/v1/live/set_black_white_list")
            .access_token(&body.access_token)
            .json(&body)?;
        self.client().execute(request).await
    }
}

impl ByteDanceApi for LiveApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "live"
    }
}
