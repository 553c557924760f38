//! TikTok Shop open APIs
//!
//! - [`auth`] - seller authorization tokens (separate auth endpoint, unsigned)
//! - [`fulfillment`] - packages, shipping and order splitting (signed)
//!
//! Signed calls carry `app_key`, `timestamp`, `access_token`, `shop_id`,
//! `version` and `sign` in the query string; see [`sign`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use bytedance_sdk::tiktok_shop::{ShopSession, TikTokShop, TikTokShopCredentials};
//! use bytedance_sdk::tiktok_shop::fulfillment::SearchPackagesRequest;
//! use bytedance_sdk::types::{AppKey, AppSecret};
//!
//! let shop = TikTokShop::builder()
//!     .credentials(TikTokShopCredentials::new(AppKey::new("key")?, AppSecret::new("secret")?))
//!     .build()?;
//!
//! let session = ShopSession::new("seller_access_token").with_shop_id("7000000000000000001");
//! let packages = shop
//!     .fulfillment(&session)
//!     .search_packages(&SearchPackagesRequest::new(20))
//!     .await?;
//! ```

pub mod auth;
pub mod fulfillment;
pub mod sign;

use std::sync::Arc;

use crate::client::{ClientBuilder, Context, Platform};
use crate::types::{AppKey, AppSecret};

use self::auth::AuthApi;
use self::fulfillment::FulfillmentApi;

pub const TIKTOK_SHOP_BASE_URL: &str = "https://open-api.tiktokglobalshop.com/api";
pub const TIKTOK_SHOP_AUTH_BASE_URL: &str = "https://auth.tiktok-shops.com/api";
/// API version sent with every signed call
pub const DEFAULT_API_VERSION: &str = "202212";

#[derive(Debug, Clone)]
pub struct TikTokShopCredentials {
    app_key: AppKey,
    app_secret: AppSecret,
}

impl TikTokShopCredentials {
    pub fn new(app_key: AppKey, app_secret: AppSecret) -> Self {
        Self {
            app_key,
            app_secret,
        }
    }

    pub fn app_key(&self) -> &str {
        self.app_key.as_str()
    }

    pub(crate) fn app_secret(&self) -> &str {
        self.app_secret.as_str()
    }
}

pub type TikTokShopContext = Context<TikTokShopCredentials>;

/// Seller authorization used by signed calls.
#[derive(Debug, Clone)]
pub struct ShopSession {
    pub access_token: String,
    /// Required for cross-border shops
    pub shop_id: Option<String>,
}

impl ShopSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            shop_id: None,
        }
    }

    pub fn with_shop_id(mut self, shop_id: impl Into<String>) -> Self {
        self.shop_id = Some(shop_id.into());
        self
    }
}

/// TikTok Shop client
#[derive(Debug, Clone)]
pub struct TikTokShop {
    context: Arc<TikTokShopContext>,
    auth_base_url: String,
    version: String,
}

impl Platform for TikTokShop {
    type Credentials = TikTokShopCredentials;
    const NAME: &'static str = "tiktok_shop";
    const DEFAULT_BASE_URL: &'static str = TIKTOK_SHOP_BASE_URL;

    fn from_context(context: Arc<Context<Self::Credentials>>) -> Self {
        Self {
            context,
            auth_base_url: TIKTOK_SHOP_AUTH_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl TikTokShop {
    pub fn builder() -> ClientBuilder<TikTokShop> {
        ClientBuilder::default()
    }

    /// Overrides the auth endpoint.
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the `version` query parameter.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn app_key(&self) -> &str {
        self.context.credentials.app_key()
    }

    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn context(&self) -> &Arc<TikTokShopContext> {
        &self.context
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.context.clone(), self.auth_base_url.clone())
    }

    pub fn fulfillment(&self, session: &ShopSession) -> FulfillmentApi {
        FulfillmentApi::new(self.context.clone(), session.clone(), self.version.clone())
    }
}
