//! Fulfillment API
//!
//! Package search and detail, shipping documents, ready-to-ship, delivery
//! updates, order splitting and pre-combined packages. Every call is signed
//! and carries the seller's [`ShopSession`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::ShopResponse;
use crate::utils::{serialize_base64, unix_timestamp};

use super::sign::sign;
use super::{ShopSession, TikTokShopContext, TikTokShopCredentials};

const FULFILLMENT_PATH: &str = "/fulfillment";

pub type FulfillmentResponse = ShopResponse<Value>;

// Packages

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPackagesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<i32>,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SearchPackagesRequest {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PackageSummary {
    #[serde(default)]
    pub package_id: String,
    #[serde(default)]
    pub package_status: i32,
    #[serde(default)]
    pub update_time: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchPackagesData {
    #[serde(default)]
    pub more: bool,
    #[serde(default)]
    pub next_cursor: String,
    #[serde(default)]
    pub package_list: Vec<PackageSummary>,
    #[serde(default)]
    pub total: i64,
}

pub type SearchPackagesResponse = ShopResponse<SearchPackagesData>;

#[derive(Debug, Clone)]
pub struct ShippingDocumentRequest {
    pub package_id: String,
    /// 1 shipping label, 2 pick list, 3 both
    pub document_type: i32,
    /// 0 A6, 1 A5
    pub document_size: Option<i32>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShippingDocumentData {
    #[serde(default)]
    pub doc_url: String,
}

pub type ShippingDocumentResponse = ShopResponse<ShippingDocumentData>;

/// Ready-to-ship for one package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipPackageRequest {
    pub package_id: String,
    /// 1 pickup, 2 drop off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pick_up_type: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchShipPackagesRequest {
    pub package_list: Vec<ShipPackageRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShippingInfoRequest {
    pub package_id: String,
    pub tracking_number: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDeliveryStatusRequest {
    pub delivery_packages: Vec<Value>,
}

// Order split

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOrderSplitRequest {
    pub order_id_list: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitGroup {
    pub pre_split_pkg_id: i64,
    pub order_line_id_list: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmOrderSplitRequest {
    pub order_id: i64,
    pub split_group: Vec<SplitGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemovePackageOrdersRequest {
    pub package_id: String,
    pub order_id_list: Vec<String>,
}

// Pre-combined packages

#[derive(Debug, Clone)]
pub struct PreCombinePackagesRequest {
    pub cursor: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreCombinePackage {
    pub pre_combine_pkg_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmPreCombinePackageRequest {
    pub pre_combine_pkg_list: Vec<PreCombinePackage>,
}

// Uploads

/// Image sent base64-encoded in the JSON body.
#[derive(Debug, Clone, Serialize)]
pub struct UploadImageRequest {
    #[serde(serialize_with = "serialize_base64")]
    pub img_data: Vec<u8>,
    /// 1 proof of delivery, 2 package photo
    pub img_scene: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadFileRequest {
    #[serde(serialize_with = "serialize_base64")]
    pub file_data: Vec<u8>,
    /// File name including the `.pdf` extension
    pub file_name: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadImageData {
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub img_height: i32,
    #[serde(default)]
    pub img_width: i32,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadFileData {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
}

pub type UploadImageResponse = ShopResponse<UploadImageData>;
pub type UploadFileResponse = ShopResponse<UploadFileData>;

/// Fulfillment API bound to one seller session
pub struct FulfillmentApi {
    context: Arc<TikTokShopContext>,
    session: ShopSession,
    version: String,
}

impl FulfillmentApi {
    pub fn new(context: Arc<TikTokShopContext>, session: ShopSession, version: String) -> Self {
        Self {
            context,
            session,
            version,
        }
    }

    /// Path prefix of the configured base URL, e.g. `/api`.
    fn base_path(&self) -> Result<String, ByteDanceError> {
        let url = reqwest::Url::parse(self.client().base_url())
            .map_err(|e| ByteDanceError::Config(format!("Invalid base_url: {}", e)))?;
        Ok(url.path().trim_end_matches('/').to_string())
    }

    /// Adds the common parameters and the signature.
    pub(crate) fn signed(&self, request: ApiRequest) -> Result<ApiRequest, ByteDanceError> {
        ByteDanceError::require_non_empty("access_token", &self.session.access_token)?;
        let credentials = self.credentials();

        let request = request
            .query("app_key", credentials.app_key())
            .query("timestamp", unix_timestamp())
            .query("access_token", &self.session.access_token)
            .query_opt("shop_id", self.session.shop_id.as_deref())
            .query("version", &self.version);

        let path = format!("{}{}", self.base_path()?, request.path());
        let signature = sign(credentials.app_secret(), &path, request.query_pairs())?;
        Ok(request.query("sign", signature))
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ShopResponse<T>, ByteDanceError> {
        let request = self.signed(request)?;
        self.client().execute(request).await
    }

    fn get(name: &str) -> ApiRequest {
        ApiRequest::get(format!("{FULFILLMENT_PATH}/{name}"))
    }

    fn post<B: Serialize + ?Sized>(name: &str, body: &B) -> Result<ApiRequest, ByteDanceError> {
        ApiRequest::post(format!("{FULFILLMENT_PATH}/{name}")).json(body)
    }

    /// POST /fulfillment/search
    pub async fn search_packages(
        &self,
        request: &SearchPackagesRequest,
    ) -> Result<SearchPackagesResponse, ByteDanceError> {
        self.send(Self::post("search", request)?).await
    }

    /// GET /fulfillment/detail
    pub async fn get_package_detail(
        &self,
        package_id: &str,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", package_id)?;
        self.send(Self::get("detail").query("package_id", package_id))
            .await
    }

    /// GET /fulfillment/shipping_info
    pub async fn get_package_shipping_info(
        &self,
        package_id: &str,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", package_id)?;
        self.send(Self::get("shipping_info").query("package_id", package_id))
            .await
    }

    /// GET /fulfillment/shipping_document
    pub async fn get_package_shipping_document(
        &self,
        request: &ShippingDocumentRequest,
    ) -> Result<ShippingDocumentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", &request.package_id)?;
        let api_request = Self::get("shipping_document")
            .query("package_id", &request.package_id)
            .query("document_type", request.document_type)
            .query_opt("document_size", request.document_size);
        self.send(api_request).await
    }

    /// POST /fulfillment/rts
    pub async fn ship_package(
        &self,
        request: &ShipPackageRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", &request.package_id)?;
        self.send(Self::post("rts", request)?).await
    }

    /// POST /fulfillment/batch_rts
    pub async fn batch_ship_packages(
        &self,
        request: &BatchShipPackagesRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        if request.package_list.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "package_list must not be empty".to_string(),
            ));
        }
        self.send(Self::post("batch_rts", request)?).await
    }

    /// GET /fulfillment/package_pickup_config/list
    pub async fn get_package_pickup_config(
        &self,
        package_id: &str,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", package_id)?;
        self.send(Self::get("package_pickup_config/list").query("package_id", package_id))
            .await
    }

    /// POST /fulfillment/shipping_info/update
    pub async fn update_package_shipping_info(
        &self,
        request: &UpdateShippingInfoRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", &request.package_id)?;
        ByteDanceError::require_non_empty("tracking_number", &request.tracking_number)?;
        self.send(Self::post("shipping_info/update", request)?).await
    }

    /// POST /fulfillment/delivery
    pub async fn update_package_delivery_status(
        &self,
        request: &UpdateDeliveryStatusRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        self.send(Self::post("delivery", request)?).await
    }

    /// POST /fulfillment/order_split/verify
    pub async fn verify_order_split(
        &self,
        request: &VerifyOrderSplitRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        self.send(Self::post("order_split/verify", request)?).await
    }

    /// POST /fulfillment/order_split/confirm
    pub async fn confirm_order_split(
        &self,
        request: &ConfirmOrderSplitRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        self.send(Self::post("order_split/confirm", request)?).await
    }

    /// POST /fulfillment/package/remove
    pub async fn remove_package_orders(
        &self,
        request: &RemovePackageOrdersRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("package_id", &request.package_id)?;
        self.send(Self::post("package/remove", request)?).await
    }

    /// GET /fulfillment/pre_combine_pkg/list
    pub async fn search_pre_combine_packages(
        &self,
        request: &PreCombinePackagesRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        let api_request = Self::get("pre_combine_pkg/list")
            .query_opt("cursor", request.cursor.as_deref())
            .query("page_size", request.page_size);
        self.send(api_request).await
    }

    /// POST /fulfillment/pre_combine_pkg/confirm
    pub async fn confirm_pre_combine_package(
        &self,
        request: &ConfirmPreCombinePackageRequest,
    ) -> Result<FulfillmentResponse, ByteDanceError> {
        self.send(Self::post("pre_combine_pkg/confirm", request)?).await
    }

    /// POST /fulfillment/uploadimage
    pub async fn upload_image(
        &self,
        request: &UploadImageRequest,
    ) -> Result<UploadImageResponse, ByteDanceError> {
        if request.img_data.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "img_data must not be empty".to_string(),
            ));
        }
        self.send(Self::post("uploadimage", request)?).await
    }

    /// POST /fulfillment/uploadfile
    pub async fn upload_file(
        &self,
        request: &UploadFileRequest,
    ) -> Result<UploadFileResponse, ByteDanceError> {
        if request.file_data.is_empty() {
            return Err(ByteDanceError::InvalidArgument(
                "file_data must not be empty".to_string(),
            ));
        }
        ByteDanceError::require_non_empty("file_name", &request.file_name)?;
        self.send(Self::post("uploadfile", request)?).await
    }
}

impl ByteDanceApi for FulfillmentApi {
    type Credentials = TikTokShopCredentials;

    fn context(&self) -> &TikTokShopContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "fulfillment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiktok_shop::test_support::*;
    use crate::types::ApiResponse;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn ok(data: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "Success",
            "request_id": "202301010000",
            "data": data
        }))
    }

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn session() -> ShopSession {
        ShopSession::new("seller_tok").with_shop_id("shop_1")
    }

    #[tokio::test]
    async fn test_signed_request_carries_common_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/fulfillment/detail"))
            .and(query_param("app_key", TEST_APP_KEY))
            .and(query_param("access_token", "seller_tok"))
            .and(query_param("shop_id", "shop_1"))
            .and(query_param("version", "202212"))
            .and(query_param("package_id", "pkg_1"))
            .respond_with(ok(json!({"package_id": "pkg_1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", mock_server.uri()));
        let response = shop
            .fulfillment(&session())
            .get_package_detail("pkg_1")
            .await
            .unwrap();
        assert_eq!(response.data.unwrap()["package_id"], "pkg_1");

        let received = mock_server.received_requests().await.unwrap();
        let pairs = query_pairs(&received[0]);
        let sent_sign = pairs
            .iter()
            .find(|(k, _)| k == "sign")
            .map(|(_, v)| v.clone())
            .unwrap();
        let expected = sign(TEST_APP_SECRET, "/api/fulfillment/detail", &pairs).unwrap();
        assert_eq!(sent_sign, expected);
    }

    #[tokio::test]
    async fn test_search_packages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/fulfillment/search"))
            .and(body_json(json!({"page_size": 20, "package_status": 1})))
            .respond_with(ok(json!({
                "more": false,
                "next_cursor": "",
                "package_list": [{"package_id": "pkg_1", "package_status": 1, "update_time": 1700000000}],
                "total": 1
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", mock_server.uri()));
        let mut request = SearchPackagesRequest::new(20);
        request.package_status = Some(1);
        let response = shop
            .fulfillment(&session())
            .search_packages(&request)
            .await
            .unwrap();

        assert!(response.is_successful());
        let data = response.data.unwrap();
        assert_eq!(data.total, 1);
        assert_eq!(data.package_list[0].package_id, "pkg_1");
    }

    #[tokio::test]
    async fn test_shipping_document_optional_size() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/fulfillment/shipping_document"))
            .and(query_param("document_type", "1"))
            .respond_with(ok(json!({"doc_url": "https://example.com/label.pdf"})))
            .mount(&mock_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", mock_server.uri()));
        let response = shop
            .fulfillment(&ShopSession::new("seller_tok"))
            .get_package_shipping_document(&ShippingDocumentRequest {
                package_id: "pkg_1".into(),
                document_type: 1,
                document_size: None,
            })
            .await
            .unwrap();
        assert_eq!(response.data.unwrap().doc_url, "https://example.com/label.pdf");

        let received = mock_server.received_requests().await.unwrap();
        let pairs = query_pairs(&received[0]);
        assert!(!pairs.iter().any(|(k, _)| k == "document_size" || k == "shop_id"));
    }

    #[tokio::test]
    async fn test_upload_image_base64() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/fulfillment/uploadimage"))
            .and(body_json(json!({"img_data": "aGVsbG8=", "img_scene": 1})))
            .respond_with(ok(json!({
                "img_url": "https://example.com/img.jpg",
                "img_height": 100,
                "img_width": 200
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", mock_server.uri()));
        let response = shop
            .fulfillment(&session())
            .upload_image(&UploadImageRequest {
                img_data: b"hello".to_vec(),
                img_scene: 1,
            })
            .await
            .unwrap();

        assert_eq!(response.data.unwrap().img_width, 200);
    }

    #[tokio::test]
    async fn test_api_error_stays_in_model() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/fulfillment/rts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 36009003,
                "message": "package status not allowed",
                "request_id": "r1"
            })))
            .mount(&mock_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", mock_server.uri()));
        let response = shop
            .fulfillment(&session())
            .ship_package(&ShipPackageRequest {
                package_id: "pkg_1".into(),
                pick_up_type: Some(1),
                extra: Map::new(),
            })
            .await
            .unwrap();

        assert_eq!(response.error_code(), 36009003);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_guards() {
        let shop = create_test_shop("http://127.0.0.1:9/api");
        let api = shop.fulfillment(&session());

        assert!(matches!(
            api.get_package_detail("").await,
            Err(ByteDanceError::InvalidArgument(_))
        ));
        assert!(matches!(
            api.batch_ship_packages(&BatchShipPackagesRequest::default()).await,
            Err(ByteDanceError::InvalidArgument(_))
        ));

        let no_token = shop.fulfillment(&ShopSession::new(""));
        assert!(matches!(
            no_token.search_packages(&SearchPackagesRequest::new(10)).await,
            Err(ByteDanceError::InvalidArgument(_))
        ));
    }
}
