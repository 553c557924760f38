//! Search API

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::{OpenPlatformResponse, Payload};

use super::{DouyinContext, DouyinCredentials};

/// Optional client device information forwarded as request headers.
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    pub brand: Option<String>,
    pub platform: Option<String>,
    pub device_type: Option<String>,
    pub client_ip: Option<String>,
    pub os_version: Option<String>,
    pub shark_channel: Option<String>,
}

/// Reply to a comment on a video found through search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplySearchCommentRequest {
    #[serde(skip)]
    pub open_id: String,
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip)]
    pub device: DeviceInfo,
    pub sec_item_id: String,
    /// Comment being replied to; top-level comment when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    pub content: String,
}

pub type ReplySearchCommentResponse = OpenPlatformResponse<Payload>;

pub struct SearchApi {
    context: Arc<DouyinContext>,
}

impl SearchApi {
    pub fn new(context: Arc<DouyinContext>) -> Self {
        Self { context }
    }

    /// POST /video/search/comment/reply/
    pub async fn reply_search_comment(
        &self,
        request: &ReplySearchCommentRequest,
    ) -> Result<ReplySearchCommentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        ByteDanceError::require_non_empty("sec_item_id", &request.sec_item_id)?;
        ByteDanceError::require_non_empty("content", &request.content)?;

        let device = &request.device;
        let api_request = ApiRequest::post("/video/search/comment/reply/")
            .query("open_id", &request.open_id)
            .access_token(&request.access_token)
            .header_opt("x-tt-device-brand", device.brand.as_deref())
            .header_opt("x-tt-device-platform", device.platform.as_deref())
            .header_opt("x-tt-device-type", device.device_type.as_deref())
            .header_opt("x-tt-client-ip", device.client_ip.as_deref())
            .header_opt("x-tt-os-version", device.os_version.as_deref())
            .header_opt("x-tt-shark-channel", device.shark_channel.as_deref())
            .json(request)?;
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for SearchApi {
    type Credentials = DouyinCredentials;

    fn context(&self) -> &DouyinContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "search"
    }
}
