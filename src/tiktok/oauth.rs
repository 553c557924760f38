//! TikTok OAuth API
//!
//! `client_key` is always taken from the client's credentials.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::{OpenPlatformResponse, Payload};

use super::{TikTokContext, TikTokCredentials};

#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    pub grant_type: String,
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            grant_type: "refresh_token".to_string(),
            refresh_token: refresh_token.into(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub open_id: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub access_token: String,
    /// Seconds
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_expires_in: i64,
}

pub type RefreshTokenResponse = OpenPlatformResponse<TokenPayload>;

#[derive(Debug, Clone)]
pub struct RevokeRequest {
    pub open_id: String,
    pub access_token: String,
}

pub type RevokeResponse = OpenPlatformResponse<Payload>;

#[derive(Debug, Clone)]
pub struct GetQrcodeRequest {
    /// Comma separated scopes, e.g. `user.info.basic,video.list`
    pub scope: String,
    /// Redirect URL after a successful scan
    pub next: String,
    pub state: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QrcodePayload {
    /// Base64 QR code image or URL
    #[serde(default)]
    pub scan_qrcode_url: String,
    /// Polling token for [`OAuthApi::check_qrcode`]
    #[serde(default)]
    pub token: String,
}

pub type GetQrcodeResponse = OpenPlatformResponse<QrcodePayload>;

#[derive(Debug, Clone)]
pub struct CheckQrcodeRequest {
    pub scope: String,
    pub next: String,
    pub token: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckQrcodePayload {
    /// `new`, `scanned`, `confirmed`, `expired`
    #[serde(default)]
    pub status: String,
    /// Set once confirmed
    #[serde(default)]
    pub redirect_url: Option<String>,
}

pub type CheckQrcodeResponse = OpenPlatformResponse<CheckQrcodePayload>;

pub struct OAuthApi {
    context: Arc<TikTokContext>,
}

impl OAuthApi {
    pub fn new(context: Arc<TikTokContext>) -> Self {
        Self { context }
    }

    /// POST /oauth/refresh_token/
    pub async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("refresh_token", &request.refresh_token)?;
        let api_request = ApiRequest::post("/oauth/refresh_token/")
            .query("client_key", self.credentials().client_key())
            .query("grant_type", &request.grant_type)
            .query("refresh_token", &request.refresh_token);
        self.client().execute(api_request).await
    }

    /// POST /oauth/revoke/
    pub async fn revoke(&self, request: &RevokeRequest) -> Result<RevokeResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("open_id", &request.open_id)?;
        ByteDanceError::require_non_empty("access_token", &request.access_token)?;
        let api_request = ApiRequest::post("/oauth/revoke/")
            .query("open_id", &request.open_id)
            .query("access_token", &request.access_token);
        self.client().execute(api_request).await
    }

    /// GET /v0/oauth/get_qrcode
    pub async fn get_qrcode(
        &self,
        request: &GetQrcodeRequest,
    ) -> Result<GetQrcodeResponse, ByteDanceError> {
        let api_request = ApiRequest::get("/v0/oauth/get_qrcode")
            .query("client_key", self.credentials().client_key())
            .query("scope", &request.scope)
            .query("next", &request.next)
            .query_opt("state", request.state.as_deref());
        self.client().execute(api_request).await
    }

    /// GET /v0/oauth/check_qrcode
    pub async fn check_qrcode(
        &self,
        request: &CheckQrcodeRequest,
    ) -> Result<CheckQrcodeResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("token", &request.token)?;
        let api_request = ApiRequest::get("/v0/oauth/check_qrcode")
            .query("client_key", self.credentials().client_key())
            .query("scope", &request.scope)
            .query("next", &request.next)
            .query("token", &request.token);
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for OAuthApi {
    type Credentials = TikTokCredentials;

    fn context(&self) -> &TikTokContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "oauth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiktok::test_support::*;
    use crate::types::ApiResponse;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_refresh_token_uses_client_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/refresh_token/"))
            .and(query_param("client_key", TEST_CLIENT_KEY))
            .and(query_param("grant_type", "refresh_token"))
            .and(query_param("refresh_token", "rft.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "error_code": 0,
                    "description": "",
                    "open_id": "open_1",
                    "scope": "user.info.basic",
                    "access_token": "act.2",
                    "expires_in": 86400,
                    "refresh_token": "rft.2",
                    "refresh_expires_in": 31536000
                },
                "message": "success"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = OAuthApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .refresh_token(&RefreshTokenRequest::new("rft.1"))
            .await
            .unwrap();

        assert!(response.is_successful());
        assert_eq!(response.data.payload.access_token, "act.2");
        assert_eq!(response.message.as_deref(), Some("success"));
    }

    #[tokio::test]
    async fn test_revoke() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/revoke/"))
            .and(query_param("open_id", "open_1"))
            .and(query_param("access_token", "act.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"error_code": 0, "description": ""}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = OAuthApi::new(create_test_context(&mock_server.uri()));
        api.revoke(&RevokeRequest {
            open_id: "open_1".into(),
            access_token: "act.1".into(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_get_qrcode_omits_missing_state() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/oauth/get_qrcode"))
            .and(query_param("client_key", TEST_CLIENT_KEY))
            .and(query_param("scope", "user.info.basic"))
            .and(query_param("next", "https://example.com/cb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "error_code": 0,
                    "description": "",
                    "scan_qrcode_url": "https://www.tiktok.com/qr/abc",
                    "token": "qr_token"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = OAuthApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .get_qrcode(&GetQrcodeRequest {
                scope: "user.info.basic".into(),
                next: "https://example.com/cb".into(),
                state: None,
            })
            .await
            .unwrap();
        assert_eq!(response.data.payload.token, "qr_token");

        let received = mock_server.received_requests().await.unwrap();
        assert!(!received[0].url.query().unwrap_or_default().contains("state="));
    }

    #[tokio::test]
    async fn test_check_qrcode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v0/oauth/check_qrcode"))
            .and(query_param("token", "qr_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"error_code": 0, "description": "", "status": "scanned"}
            })))
            .mount(&mock_server)
            .await;

        let api = OAuthApi::new(create_test_context(&mock_server.uri()));
        let response = api
            .check_qrcode(&CheckQrcodeRequest {
                scope: "user.info.basic".into(),
                next: "https://example.com/cb".into(),
                token: "qr_token".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.data.payload.status, "scanned");
        assert!(response.data.payload.redirect_url.is_none());
    }
}
