//! Service category API

use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::capacity::AuthorizedRequest;
use super::{MicroAppContext, MicroAppCredentials};

pub type AppCategoriesResponse = MicroAppResponse<Value>;

pub struct CategoryApi {
    context: Arc<MicroAppContext>,
}

impl CategoryApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// GET /apps/v1/category/query_app_categories
    pub async fn query_app_categories(
        &self,
        request: &AuthorizedRequest,
    ) -> Result<AppCategoriesResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", &request.access_token)?;
        let request = ApiRequest::get("/apps/v1/category/query_app_categories")
            .access_token(&request.access_token);
        self.client().execute(request).await
    }
}

impl ByteDanceApi for CategoryApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "category"
    }
}
