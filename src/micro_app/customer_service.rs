//! Customer service API

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

/// Query for `GET /apps/chat/customer_service_url`.
#[derive(Debug, Clone)]
pub struct ChatCustomerServiceUrlRequest {
    pub access_token: String,
    pub app_id: Option<String>,
    pub open_id: String,
    /// Source, `1128` for the micro app
    pub r#type: i32,
    /// Scene value, `1` for in-app entries
    pub scene: i32,
    pub order_id: Option<String>,
    /// `1` for IM customer service
    pub im_type: Option<i32>,
}

impl ChatCustomerServiceUrlRequest {
    pub fn new(access_token: impl Into<String>, open_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            app_id: None,
            open_id: open_id.into(),
            r#type: 1128,
            scene: 1,
            order_id: None,
            im_type: None,
        }
    }
}

/// Query for `GET /apps/customer_service/url`.
#[derive(Debug, Clone)]
pub struct CustomerServiceUrlRequest {
    pub access_token: String,
    pub app_id: Option<String>,
    pub open_id: String,
    pub r#type: i32,
    pub scene: i32,
}

impl CustomerServiceUrlRequest {
    pub fn new(access_token: impl Into<String>, open_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            app_id: None,
            open_id: open_id.into(),
            r#type: 1128,
            scene: 1,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerServiceUrlData {
    #[serde(default)]
    pub url: String,
}

pub type CustomerServiceUrlResponse = MicroAppResponse<CustomerServiceUrlData>;

/// Body of `POST /apps/message/custom/send`.
///
/// Message content goes in `extra`, keyed by `msg_type` (e.g. `text`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendCustomMessageRequest {
    #[serde(skip)]
    pub access_token: String,
    pub open_id: String,
    pub msg_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SendCustomMessageRequest {
    pub fn text(
        access_token: impl Into<String>,
        open_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut extra = Map::new();
        extra.insert(
            "text".to_string(),
            serde_json::json!({ "content": content.into() }),
        );
        Self {
            access_token: access_token.into(),
            open_id: open_id.into(),
            msg_type: "text".to_string(),
            extra,
        }
    }
}

pub type SendCustomMessageResponse = MicroAppResponse<Value>;

pub struct CustomerServiceApi {
    context: Arc<MicroAppContext>,
}

impl CustomerServiceApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// GET /apps/chat/customer_service_url
    pub async fn chat_customer_service_url(
        &self,
        request: &ChatCustomerServiceUrlRequest,
    ) -> Result<CustomerServiceUrlResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        let mut app_id = request.app_id.clone();
        self.credentials().fill_app_id(&mut app_id);

        let request = ApiRequest::get("/apps/chat/customer_service_url")
            .access_token(&request.access_token)
            .query_opt("appid", app_id)
            .query("openid", &request.open_id)
            .query("type", request.r#type)
            .query("scene", request.scene)
            .query_opt("order_id", request.order_id.as_deref())
            .query_opt("im_type", request.im_type);
        self.client().execute(request).await
    }

    /// GET /apps/customer_service/url
    pub async fn customer_service_url(
        &self,
        request: &CustomerServiceUrlRequest,
    ) -> Result<CustomerServiceUrlResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        let mut app_id = request.app_id.clone();
        self.credentials().fill_app_id(&mut app_id);

        let request = ApiRequest::get("/apps/customer_service/url")
            .query("access_token", &request.access_token)
            .query_opt("appid", app_id)
            .query("openid", &request.open_id)
            .query("type", request.r#type)
            .query("scene", request.scene);
        self.client().execute(request).await
    }

    /// POST /apps/message/custom/send
    pub async fn send_custom_message(
        &self,
        request: &SendCustomMessageRequest,
    ) -> Result<SendCustomMessageResponse, ByteDanceError> {
        let api_request = ApiRequest::post("/apps/message/custom/send")
            .query("access_token", &request.access_token)
            .json(request)?;
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for CustomerServiceApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "customer_service"
    }
}
