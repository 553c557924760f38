//! Data analysis API (`/apps/v1/data_analysis/...`)
//!
//! All endpoints are GET requests authenticated by the `access-token`
//! header. Time ranges are unix seconds; `host_name` selects the host app
//! (`douyin`, `douyin_lite`, `toutiao`, ...), `version_type` the release
//! channel (`current`, `latest`, ...).
//!
//! The user-centred reports share [`AnalysisQuery`]; each endpoint sends only
//! the filters it supports, listed on the method.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

const DATA_ANALYSIS_PATH: &str = "/apps/v1/data_analysis";

pub type AnalysisResponse = MicroAppResponse<Value>;

#[derive(Debug, Clone, Default)]
pub struct DealOverviewRequest {
    pub access_token: String,
    pub start_time: i64,
    pub end_time: i64,
    pub host_name: Option<String>,
    pub version_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VideoDealDataRequest {
    pub access_token: String,
    pub start_time: i64,
    pub end_time: i64,
    pub host_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LiveRoomRequest {
    pub access_token: String,
    pub anchor_name: Option<String>,
}

/// Targets one live room; used by the live room and live deal reports.
#[derive(Debug, Clone, Default)]
pub struct LiveRoomDataRequest {
    pub access_token: String,
    pub live_room_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProductDealDataRequest {
    pub access_token: String,
    pub start_time: i64,
    pub end_time: i64,
    pub page_num: u32,
    pub page_size: u32,
    pub host_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RealTimeUserDataRequest {
    pub access_token: String,
    pub host_name: Option<String>,
    pub version_type: Option<String>,
}

/// Time range plus optional filters for the user reports.
#[derive(Debug, Clone, Default)]
pub struct AnalysisQuery {
    pub access_token: String,
    pub start_time: i64,
    pub end_time: i64,
    /// `new` / `active` users
    pub user_type: Option<String>,
    pub host_name: Option<String>,
    /// `ios` / `android`
    pub os: Option<String>,
    pub version_type: Option<String>,
}

impl AnalysisQuery {
    pub fn new(access_token: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            access_token: access_token.into(),
            start_time,
            end_time,
            ..Default::default()
        }
    }
}

/// Data analysis API
pub struct DataAnalysisApi {
    context: Arc<MicroAppContext>,
}

impl DataAnalysisApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    fn request(&self, name: &str, access_token: &str) -> Result<ApiRequest, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", access_token)?;
        Ok(ApiRequest::get(format!("{DATA_ANALYSIS_PATH}/{name}")).access_token(access_token))
    }

    fn time_range(
        &self,
        name: &str,
        access_token: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<ApiRequest, ByteDanceError> {
        if start_time > end_time {
            return Err(ByteDanceError::InvalidArgument(format!(
                "start_time ({start_time}) must not be after end_time ({end_time})"
            )));
        }
        Ok(self
            .request(name, access_token)?
            .query("start_time", start_time)
            .query("end_time", end_time))
    }

    /// GET query_deal_overview_data
    pub async fn query_deal_overview_data(
        &self,
        request: &DealOverviewRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_deal_overview_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_video_deal_data
    pub async fn query_video_deal_data(
        &self,
        request: &VideoDealDataRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_video_deal_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("host_name", request.host_name.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_live_room
    pub async fn query_live_room(
        &self,
        request: &LiveRoomRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .request("query_live_room", &request.access_token)?
            .query_opt("anchor_name", request.anchor_name.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_live_room_data
    pub async fn query_live_room_data(
        &self,
        request: &LiveRoomDataRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .request("query_live_room_data", &request.access_token)?
            .query("live_room_id", &request.live_room_id);
        self.client().execute(api_request).await
    }

    /// GET query_live_deal_data
    pub async fn query_live_deal_data(
        &self,
        request: &LiveRoomDataRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .request("query_live_deal_data", &request.access_token)?
            .query("live_room_id", &request.live_room_id);
        self.client().execute(api_request).await
    }

    /// GET query_product_deal_data
    pub async fn query_product_deal_data(
        &self,
        request: &ProductDealDataRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_product_deal_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query("page_num", request.page_num)
            .query("page_size", request.page_size)
            .query_opt("host_name", request.host_name.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_behavior_data: `host_name`, `os`, `version_type`
    pub async fn query_behavior_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_behavior_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("os", request.os.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_real_time_user_data
    pub async fn query_real_time_user_data(
        &self,
        request: &RealTimeUserDataRequest,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .request("query_real_time_user_data", &request.access_token)?
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_retention_data: `user_type`, `host_name`, `os`, `version_type`
    pub async fn query_retention_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_retention_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("user_type", request.user_type.as_deref())
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("os", request.os.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_scene_data: `host_name`, `version_type`
    pub async fn query_scene_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_scene_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_user_portrait_data: `user_type`, `host_name`, `version_type`
    pub async fn query_user_portrait_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_user_portrait_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("user_type", request.user_type.as_deref())
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_client_data: `user_type`, `host_name`, `version_type`
    pub async fn query_client_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_client_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("user_type", request.user_type.as_deref())
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }

    /// GET query_page_data: `host_name`, `os`, `version_type`
    pub async fn query_page_data(
        &self,
        request: &AnalysisQuery,
    ) -> Result<AnalysisResponse, ByteDanceError> {
        let api_request = self
            .time_range(
                "query_page_data",
                &request.access_token,
                request.start_time,
                request.end_time,
            )?
            .query_opt("host_name", request.host_name.as_deref())
            .query_opt("os", request.os.as_deref())
            .query_opt("version_type", request.version_type.as_deref());
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for DataAnalysisApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "data_analysis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::micro_app::test_support::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "err_no": 0,
            "err_msg": "",
            "log_id": "2022",
            "data": {"total": 1}
        }))
    }

    #[tokio::test]
    async fn test_behavior_data_sends_only_supported_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apps/v1/data_analysis/query_behavior_data"))
            .and(header("access-token", "tok"))
            .and(query_param("start_time", "1660000000"))
            .and(query_param("end_time", "1660086400"))
            .and(query_param("os", "ios"))
            .respond_with(ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = DataAnalysisApi::new(create_test_context(&mock_server.uri()));
        let request = AnalysisQuery {
            user_type: Some("new".into()),
            os: Some("ios".into()),
            ..AnalysisQuery::new("tok", 1660000000, 1660086400)
        };
        api.query_behavior_data(&request).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert!(!query.contains("user_type"));
        assert!(!query.contains("host_name"));
    }

    #[tokio::test]
    async fn test_retention_data_sends_user_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apps/v1/data_analysis/query_retention_data"))
            .and(query_param("user_type", "active"))
            .and(query_param("version_type", "current"))
            .respond_with(ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = DataAnalysisApi::new(create_test_context(&mock_server.uri()));
        let request = AnalysisQuery {
            user_type: Some("active".into()),
            version_type: Some("current".into()),
            ..AnalysisQuery::new("tok", 1, 2)
        };
        api.query_retention_data(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_live_room_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apps/v1/data_analysis/query_live_room_data"))
            .and(query_param("live_room_id", "7140000000000000000"))
            .respond_with(ok())
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = DataAnalysisApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .query_live_room_data(&LiveRoomDataRequest {
                access_token: "tok".into(),
                live_room_id: "7140000000000000000".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.data.unwrap()["total"], 1);
    }

    #[tokio::test]
    async fn test_inverted_time_range_rejected() {
        let api = DataAnalysisApi::new(create_test_context("http://127.0.0.1:9"));
        let result = api
            .query_scene_data(&AnalysisQuery::new("tok", 200, 100))
            .await;
        assert!(matches!(result, Err(ByteDanceError::InvalidArgument(_))));
    }
}
