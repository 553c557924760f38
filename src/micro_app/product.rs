//! Product resource API

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

/// Body of `POST /product/api/upload_resource`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResourceRequest {
    #[serde(skip)]
    pub access_token: String,
    /// 1 image, 2 video
    pub resource_type: i32,
    /// Publicly reachable URL of the resource
    pub resource_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadResourceData {
    #[serde(default)]
    pub resource_uri: String,
}

pub type UploadResourceResponse = MicroAppResponse<UploadResourceData>;

pub struct ProductApi {
    context: Arc<MicroAppContext>,
}

impl ProductApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /product/api/upload_resource
    pub async fn upload_resource(
        &self,
        request: &UploadResourceRequest,
    ) -> Result<UploadResourceResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("resource_url", &request.resource_url)?;
        let api_request = ApiRequest::post("/product/api/upload_resource")
            .access_token(&request.access_token)
            .json(request)?;
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for ProductApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "product"
    }
}
