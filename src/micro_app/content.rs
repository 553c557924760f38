//! Content API
//!
//! Image censoring, QR codes, share configuration, URL links and video id
//! conversion. Requests that carry an app id default it to the client's.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::{ByteDanceError, HttpError};
use crate::types::{ApiResponse, MicroAppResponse};

use super::{MicroAppContext, MicroAppCredentials};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CensorImageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub access_token: String,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Base64 image content, used when `image` is not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CensorPredict {
    #[serde(default)]
    pub model_name: String,
    /// `true` when the image hit this model
    #[serde(default)]
    pub hit: bool,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CensorImageResponse {
    #[serde(default)]
    pub(crate) error: i64,
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub predicts: Vec<CensorPredict>,
}

impl CensorImageResponse {
    /// Whether any model flagged the image.
    pub fn is_hit(&self) -> bool {
        self.predicts.iter().any(|p| p.hit)
    }
}

impl ApiResponse for CensorImageResponse {
    fn error_code(&self) -> i64 {
        self.error
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QrcodeRequest {
    pub access_token: String,
    /// Host app: `douyin`, `toutiao`, `pipixia`, `huoshan`
    #[serde(rename = "appname", skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Page path, url-encoded by the caller if it has a query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_icon: Option<bool>,
}

/// PNG image on success; error fields otherwise.
#[derive(Debug, Clone, Default)]
pub struct QrcodeResponse {
    pub(crate) errcode: i64,
    pub(crate) errmsg: String,
    pub image: Vec<u8>,
}

impl ApiResponse for QrcodeResponse {
    fn error_code(&self) -> i64 {
        self.errcode
    }

    fn error_message(&self) -> &str {
        &self.errmsg
    }
}

#[derive(Debug, Deserialize)]
struct QrcodeError {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareConfigRequest {
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub access_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type ShareConfigResponse = MicroAppResponse<Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateUrlLinkRequest {
    pub access_token: String,
    #[serde(rename = "ma_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Host app the link opens in, e.g. `douyin`
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// JSON-encoded query string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Unix seconds, at most 180 days ahead
    pub expire_time: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateUrlLinkResponse {
    #[serde(default)]
    pub(crate) err_no: i64,
    #[serde(default)]
    pub(crate) err_tips: String,
    #[serde(default)]
    pub url_link: String,
}

impl ApiResponse for GenerateUrlLinkResponse {
    fn error_code(&self) -> i64 {
        self.err_no
    }

    fn error_message(&self) -> &str {
        &self.err_tips
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryUrlLinkInfoRequest {
    pub access_token: String,
    #[serde(rename = "ma_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub url_link: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UrlLinkInfo {
    #[serde(default)]
    pub ma_app_id: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub expire_time: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryUrlLinkInfoResponse {
    #[serde(default)]
    pub(crate) err_no: i64,
    #[serde(default)]
    pub(crate) err_tips: String,
    pub url_link_info: Option<UrlLinkInfo>,
}

impl ApiResponse for QueryUrlLinkInfoResponse {
    fn error_code(&self) -> i64 {
        self.err_no
    }

    fn error_message(&self) -> &str {
        &self.err_tips
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryUrlLinkQuotaRequest {
    pub access_token: String,
    #[serde(rename = "ma_app_id", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UrlLinkQuota {
    #[serde(default)]
    pub url_link_used: i64,
    #[serde(default)]
    pub url_link_limit: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryUrlLinkQuotaResponse {
    #[serde(default)]
    pub(crate) err_no: i64,
    #[serde(default)]
    pub(crate) err_tips: String,
    pub url_link_quota: Option<UrlLinkQuota>,
}

impl ApiResponse for QueryUrlLinkQuotaResponse {
    fn error_code(&self) -> i64 {
        self.err_no
    }

    fn error_message(&self) -> &str {
        &self.err_tips
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoIdToOpenItemIdRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenItemIdToEncryptIdRequest {
    pub access_token: String,
    pub open_item_ids: Vec<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConvertResult {
    /// Source id to converted id
    #[serde(default)]
    pub convert_result: HashMap<String, String>,
}

pub type ConvertVideoIdResponse = MicroAppResponse<ConvertResult>;

/// Content API
pub struct ContentApi {
    context: Arc<MicroAppContext>,
}

impl ContentApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /apps/censor/image
    ///
    /// # Errors
    /// `InvalidArgument` when neither `image` nor `image_data` is set.
    pub async fn censor_image(
        &self,
        request: &CensorImageRequest,
    ) -> Result<CensorImageResponse, ByteDanceError> {
        if request.image.is_none() && request.image_data.is_none() {
            return Err(ByteDanceError::InvalidArgument(
                "image or image_data is required".to_string(),
            ));
        }

        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/censor/image").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/qrcode
    ///
    /// The platform answers with the PNG itself, or with a JSON error body.
    pub async fn qrcode(&self, request: &QrcodeRequest) -> Result<QrcodeResponse, ByteDanceError> {
        let api_request = ApiRequest::post("/apps/qrcode").json(request)?;
        let raw = self.client().execute_raw(api_request).await?;

        if raw.is_json() {
            let error: QrcodeError = serde_json::from_slice(&raw.body)
                .map_err(|e| ByteDanceError::Http(HttpError::Decode(e.to_string())))?;
            return Ok(QrcodeResponse {
                errcode: error.errcode,
                errmsg: error.errmsg,
                image: Vec::new(),
            });
        }

        Ok(QrcodeResponse {
            errcode: 0,
            errmsg: String::new(),
            image: raw.body,
        })
    }

    /// POST /apps/share_config
    pub async fn share_config(
        &self,
        request: &ShareConfigRequest,
    ) -> Result<ShareConfigResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/share_config").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/url_link/generate
    pub async fn generate_url_link(
        &self,
        request: &GenerateUrlLinkRequest,
    ) -> Result<GenerateUrlLinkResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/url_link/generate").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/url_link/query_info
    pub async fn query_url_link_info(
        &self,
        request: &QueryUrlLinkInfoRequest,
    ) -> Result<QueryUrlLinkInfoResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("url_link", &request.url_link)?;
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/url_link/query_info").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/url_link/query_quota
    pub async fn query_url_link_quota(
        &self,
        request: &QueryUrlLinkQuotaRequest,
    ) -> Result<QueryUrlLinkQuotaResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request = ApiRequest::post("/apps/url_link/query_quota").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/convert_video_id/video_id_to_open_item_id
    pub async fn convert_video_id_to_open_item_id(
        &self,
        request: &VideoIdToOpenItemIdRequest,
    ) -> Result<ConvertVideoIdResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);

        let request =
            ApiRequest::post("/apps/convert_video_id/video_id_to_open_item_id").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/convert_video_id/open_item_id_to_encrypt_id
    pub async fn convert_open_item_id_to_encrypt_id(
        &self,
        request: &OpenItemIdToEncryptIdRequest,
    ) -> Result<ConvertVideoIdResponse, ByteDanceError> {
        let request =
            ApiRequest::post("/apps/convert_video_id/open_item_id_to_encrypt_id").json(request)?;
        self.client().execute(request).await
    }
}

impl ByteDanceApi for ContentApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "content"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::micro_app::test_support::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_censor_image_fills_app_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/censor/image"))
            .and(body_json(json!({
                "app_id": TEST_APP_ID,
                "access_token": "tok",
                "image": "https://example.com/a.png"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": 0,
                "message": "",
                "predicts": [
                    {"model_name": "porn", "hit": false},
                    {"model_name": "ad", "hit": true}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .censor_image(&CensorImageRequest {
                access_token: "tok".into(),
                image: Some("https://example.com/a.png".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response.is_successful());
        assert!(response.is_hit());
        assert_eq!(response.predicts.len(), 2);
    }

    #[tokio::test]
    async fn test_censor_image_requires_image() {
        let api = ContentApi::new(create_test_context("http://127.0.0.1:9"));
        let result = api
            .censor_image(&CensorImageRequest {
                access_token: "tok".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ByteDanceError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_qrcode_returns_image_bytes() {
        let mock_server = MockServer::start().await;
        let png = vec![0x89u8, b'P', b'N', b'G'];

        Mock::given(method("POST"))
            .and(path("/apps/qrcode"))
            .and(body_partial_json(json!({"appname": "douyin", "width": 430})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .qrcode(&QrcodeRequest {
                access_token: "tok".into(),
                app_name: Some("douyin".into()),
                width: Some(430),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response.is_successful());
        assert_eq!(response.image, png);
    }

    #[tokio::test]
    async fn test_qrcode_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/qrcode"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errcode": 40002,
                "errmsg": "bad access_token"
            })))
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api.qrcode(&QrcodeRequest::default()).await.unwrap();

        assert_eq!(response.error_code(), 40002);
        assert_eq!(response.error_message(), "bad access_token");
        assert!(response.image.is_empty());
    }

    #[tokio::test]
    async fn test_qrcode_malformed_json_error_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/qrcode"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(b"not json".to_vec(), "application/json"),
            )
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let result = api.qrcode(&QrcodeRequest::default()).await;

        assert!(
            matches!(result, Err(ByteDanceError::Http(HttpError::Decode(_)))),
            "expected HttpError::Decode, got: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_generate_url_link() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/url_link/generate"))
            .and(body_partial_json(json!({
                "ma_app_id": TEST_APP_ID,
                "app_name": "douyin",
                "expire_time": 1700000000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 0,
                "err_tips": "success",
                "url_link": "https://z.douyin.com/xCkEAaB"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .generate_url_link(&GenerateUrlLinkRequest {
                access_token: "tok".into(),
                app_name: "douyin".into(),
                expire_time: 1700000000,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.url_link, "https://z.douyin.com/xCkEAaB");
    }

    #[tokio::test]
    async fn test_query_url_link_quota() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/url_link/query_quota"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 0,
                "err_tips": "success",
                "url_link_quota": {"url_link_used": 12, "url_link_limit": 10000}
            })))
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .query_url_link_quota(&QueryUrlLinkQuotaRequest {
                access_token: "tok".into(),
                app_id: None,
            })
            .await
            .unwrap();

        let quota = response.url_link_quota.unwrap();
        assert_eq!(quota.url_link_used, 12);
        assert_eq!(quota.url_link_limit, 10000);
    }

    #[tokio::test]
    async fn test_convert_video_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apps/convert_video_id/video_id_to_open_item_id"))
            .and(body_json(json!({
                "access_token": "tok",
                "app_id": TEST_APP_ID,
                "video_ids": ["7106070301234567890"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err_no": 0,
                "err_msg": "",
                "log_id": "1",
                "data": {"convert_result": {"7106070301234567890": "@9VwKzuuES8gmaXS7ZohjUM"}}
            })))
            .mount(&mock_server)
            .await;

        let api = ContentApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .convert_video_id_to_open_item_id(&VideoIdToOpenItemIdRequest {
                access_token: "tok".into(),
                app_id: None,
                video_ids: vec!["7106070301234567890".into()],
            })
            .await
            .unwrap();

        let data = response.data.unwrap();
        assert_eq!(
            data.convert_result["7106070301234567890"],
            "@9VwKzuuES8gmaXS7ZohjUM"
        );
    }
}
