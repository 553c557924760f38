//! Micro app (mini-program) server APIs
//!
//! Endpoint groups:
//!
//! - [`auth`] - access token and code-to-session
//! - [`capacity`] - capability management (aliases, search tags, bindings, templates, ads)
//! - [`category`] - app service categories
//! - [`data_analysis`] - transaction, live, user and page analytics
//! - [`content`] - image censoring, QR codes, share config, URL links, video id conversion
//! - [`customer_service`] - customer service links and custom messages
//! - [`live`] - live room images and black/white lists
//! - [`order`] - order sync
//! - [`task_box`] - task box and subscribe notification delivery
//! - [`product`] - product resource upload
//! - [`auth_entity`] - industry qualification submission
//!
//! ## Example
//!
//! ```rust,ignore
//! use bytedance_sdk::micro_app::{MicroApp, MicroAppCredentials};
//! use bytedance_sdk::micro_app::auth::AccessTokenRequest;
//! use bytedance_sdk::types::{AppId, AppSecret, ApiResponse};
//!
//! let app = MicroApp::builder()
//!     .credentials(MicroAppCredentials::new(
//!         AppId::new("tt1234567890abcdef")?,
//!         AppSecret::new("secret")?,
//!     ))
//!     .build()?;
//!
//! let token = app.auth().access_token(&AccessTokenRequest::default()).await?;
//! if token.is_successful() {
//!     println!("{:?}", token.data);
//! }
//! ```

pub mod auth;
pub mod auth_entity;
pub mod capacity;
pub mod category;
pub mod content;
pub mod customer_service;
pub mod data_analysis;
pub mod live;
pub mod order;
pub mod product;
pub mod task_box;

use std::sync::Arc;

use crate::client::{ClientBuilder, Context, Platform};
use crate::types::{AppId, AppSecret};

use self::auth::AuthApi;
use self::auth_entity::AuthEntityApi;
use self::capacity::CapacityApi;
use self::category::CategoryApi;
use self::content::ContentApi;
use self::customer_service::CustomerServiceApi;
use self::data_analysis::DataAnalysisApi;
use self::live::LiveApi;
use self::order::OrderApi;
use self::product::ProductApi;
use self::task_box::TaskBoxApi;

/// Toutiao developer endpoint (default)
pub const TOUTIAO_BASE_URL: &str = "https://developer.toutiao.com/api";
/// Douyin open platform endpoint for micro apps
pub const DOUYIN_BASE_URL: &str = "https://open.douyin.com/api";

/// Credentials used to fill `appid` / `secret` when a request leaves them unset.
#[derive(Debug, Clone)]
pub struct MicroAppCredentials {
    app_id: AppId,
    app_secret: AppSecret,
}

impl MicroAppCredentials {
    pub fn new(app_id: AppId, app_secret: AppSecret) -> Self {
        Self { app_id, app_secret }
    }

    pub fn app_id(&self) -> &str {
        self.app_id.as_str()
    }

    pub(crate) fn app_secret(&self) -> &str {
        self.app_secret.as_str()
    }

    pub(crate) fn fill_app_id(&self, slot: &mut Option<String>) {
        if slot.is_none() {
            *slot = Some(self.app_id().to_string());
        }
    }

    pub(crate) fn fill_app_secret(&self, slot: &mut Option<String>) {
        if slot.is_none() {
            *slot = Some(self.app_secret().to_string());
        }
    }
}

pub type MicroAppContext = Context<MicroAppCredentials>;

/// Micro app client
///
/// Cheap to clone; all endpoint groups share one HTTP client.
#[derive(Debug, Clone)]
pub struct MicroApp {
    context: Arc<MicroAppContext>,
}

impl Platform for MicroApp {
    type Credentials = MicroAppCredentials;
    const NAME: &'static str = "micro_app";
    const DEFAULT_BASE_URL: &'static str = TOUTIAO_BASE_URL;

    fn from_context(context: Arc<Context<Self::Credentials>>) -> Self {
        Self { context }
    }
}

impl MicroApp {
    pub fn builder() -> ClientBuilder<MicroApp> {
        ClientBuilder::default()
    }

    pub fn app_id(&self) -> &str {
        self.context.credentials.app_id()
    }

    pub fn context(&self) -> &Arc<MicroAppContext> {
        &self.context
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.context.clone())
    }

    pub fn capacity(&self) -> CapacityApi {
        CapacityApi::new(self.context.clone())
    }

    pub fn category(&self) -> CategoryApi {
        CategoryApi::new(self.context.clone())
    }

    pub fn data_analysis(&self) -> DataAnalysisApi {
        DataAnalysisApi::new(self.context.clone())
    }

    pub fn content(&self) -> ContentApi {
        ContentApi::new(self.context.clone())
    }

    pub fn customer_service(&self) -> CustomerServiceApi {
        CustomerServiceApi::new(self.context.clone())
    }

    pub fn live(&self) -> LiveApi {
        LiveApi::new(self.context.clone())
    }

    pub fn order(&self) -> OrderApi {
        OrderApi::new(self.context.clone())
    }

    pub fn task_box(&self) -> TaskBoxApi {
        TaskBoxApi::new(self.context.clone())
    }

    pub fn product(&self) -> ProductApi {
        ProductApi::new(self.context.clone())
    }

    pub fn auth_entity(&self) -> AuthEntityApi {
        AuthEntityApi::new(self.context.clone())
    }
}
