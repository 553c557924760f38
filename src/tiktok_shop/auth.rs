//! Seller authorization API
//!
//! Served from the separate auth endpoint. These calls are not signed and
//! pass the app key and secret directly in the query string.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::ShopResponse;

use super::{TikTokShopContext, TikTokShopCredentials};

#[derive(Debug, Clone)]
pub struct GetTokenRequest {
    /// Code received on the authorization redirect
    pub auth_code: String,
    pub grant_type: String,
}

impl GetTokenRequest {
    pub fn new(auth_code: impl Into<String>) -> Self {
        Self {
            auth_code: auth_code.into(),
            grant_type: "authorized_code".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
    pub grant_type: String,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            grant_type: "refresh_token".to_string(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TokenData {
    #[serde(default)]
    pub access_token: String,
    /// Unix seconds
    #[serde(default)]
    pub access_token_expire_in: i64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub refresh_token_expire_in: i64,
    #[serde(default)]
    pub open_id: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_base_region: String,
    #[serde(default)]
    pub user_type: i32,
}

pub type TokenResponse = ShopResponse<TokenData>;

pub struct AuthApi {
    context: Arc<TikTokShopContext>,
    auth_base_url: String,
}

impl AuthApi {
    pub fn new(context: Arc<TikTokShopContext>, auth_base_url: String) -> Self {
        Self {
            context,
            auth_base_url,
        }
    }

    fn request(&self, name: &str, grant_type: &str) -> ApiRequest {
        let credentials = self.credentials();
        ApiRequest::get(format!(
            "{}/token/{name}",
            self.auth_base_url.trim_end_matches('/')
        ))
        .query("app_key", credentials.app_key())
        .query("app_secret", credentials.app_secret())
        .query("grant_type", grant_type)
    }

    /// GET {auth}/token/get
    pub async fn get_token(
        &self,
        request: &GetTokenRequest,
    ) -> Result<TokenResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("auth_code", &request.auth_code)?;
        let api_request = self
            .request("get", &request.grant_type)
            .query("auth_code", &request.auth_code);
        self.client().execute(api_request).await
    }

    /// GET {auth}/token/refresh
    pub async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<TokenResponse, ByteDanceError> {
        ByteDanceError::require_non_empty("refresh_token", &request.refresh_token)?;
        let api_request = self
            .request("refresh", &request.grant_type)
            .query("refresh_token", &request.refresh_token);
        self.client().execute(api_request).await
    }
}

impl ByteDanceApi for AuthApi {
    type Credentials = TikTokShopCredentials;

    fn context(&self) -> &TikTokShopContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "shop_auth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiktok_shop::test_support::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_body() -> serde_json::Value {
        json!({
            "code": 0,
            "message": "success",
            "request_id": "r1",
            "data": {
                "access_token": "ROW_tok",
                "access_token_expire_in": 1700604800,
                "refresh_token": "ROW_rft",
                "refresh_token_expire_in": 1731000000,
                "open_id": "open_1",
                "seller_name": "demo shop",
                "seller_base_region": "GB",
                "user_type": 0
            }
        })
    }

    #[tokio::test]
    async fn test_get_token_uses_auth_endpoint() {
        let auth_server = MockServer::start().await;
        let api_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/token/get"))
            .and(query_param("app_key", TEST_APP_KEY))
            .and(query_param("app_secret", TEST_APP_SECRET))
            .and(query_param("grant_type", "authorized_code"))
            .and(query_param("auth_code", "code_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&auth_server)
            .await;

        let shop = create_test_shop(&format!("{}/api", api_server.uri()))
            .with_auth_base_url(format!("{}/api", auth_server.uri()));
        let response = shop
            .auth()
            .get_token(&GetTokenRequest::new("code_1"))
            .await
            .unwrap();

        let data = response.data.unwrap();
        assert_eq!(data.access_token, "ROW_tok");
        assert_eq!(data.seller_base_region, "GB");

        let received = auth_server.received_requests().await.unwrap();
        let query = received[0].url.query().unwrap_or_default();
        assert!(!query.contains("sign="));
        assert!(!query.contains("timestamp="));
        assert!(api_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let auth_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/token/refresh"))
            .and(query_param("grant_type", "refresh_token"))
            .and(query_param("refresh_token", "ROW_rft"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&auth_server)
            .await;

        let shop = create_test_shop("http://127.0.0.1:9/api")
            .with_auth_base_url(format!("{}/api", auth_server.uri()));
        let response = shop
            .auth()
            .refresh_token(&RefreshTokenRequest::new("ROW_rft"))
            .await
            .unwrap();

        assert_eq!(response.data.unwrap().refresh_token, "ROW_rft");
    }
}
