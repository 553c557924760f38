//! Order sync API
//!
//! Both endpoints pass `access_token` in the query string and report errors
//! as `err_code` / `err_msg` rather than the usual `err_no`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::ApiResponse;
use crate::utils::unix_timestamp;

use super::{MicroAppContext, MicroAppCredentials};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushOrderRequest {
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_shop_id: Option<String>,
    /// Host app, e.g. `douyin`
    pub app_name: String,
    pub open_id: String,
    /// Unix milliseconds; filled with the current time when zero
    pub update_time: i64,
    /// JSON-encoded order detail
    pub order_detail: String,
    pub order_type: i32,
    pub order_status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PushOrderResponse {
    #[serde(default)]
    pub(crate) err_code: i64,
    #[serde(default)]
    pub(crate) err_msg: String,
    /// Raw response body from the order center
    #[serde(default)]
    pub body: String,
}

impl ApiResponse for PushOrderResponse {
    fn error_code(&self) -> i64 {
        self.err_code
    }

    fn error_message(&self) -> &str {
        &self.err_msg
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteOrderRequest {
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    pub open_id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<i32>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteOrderResponse {
    #[serde(default)]
    pub(crate) err_code: i64,
    #[serde(default)]
    pub(crate) err_msg: String,
}

impl ApiResponse for DeleteOrderResponse {
    fn error_code(&self) -> i64 {
        self.err_code
    }

    fn error_message(&self) -> &str {
        &self.err_msg
    }
}

pub struct OrderApi {
    context: Arc<MicroAppContext>,
}

impl OrderApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /apps/order/v2/push
    pub async fn push_order(
        &self,
        request: &PushOrderRequest,
    ) -> Result<PushOrderResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        let mut body = request.clone();
        if body.update_time == 0 {
            body.update_time = unix_timestamp() * 1000;
        }

        let request = ApiRequest::post("/apps/order/v2/push")
            .query("access_token", &body.access_token)
            .json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/order/delete
    pub async fn delete_order(
        &self,
        request: &DeleteOrderRequest,
    ) -> Result<DeleteOrderResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("order_id", &request.order_id)?;
        let api_request = ApiRequest::post("/apps/order/delete")
            .query("access_token", &request.access_token)
            .json(request)?;
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for OrderApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "order"
    }
}
