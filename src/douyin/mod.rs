//! Douyin open platform APIs (`open.douyin.com`)
//!
//! - [`video`] - video publishing for the Douyin, Toutiao and Xigua hosts
//! - [`search`] - search comment replies
//! - [`events`] - webhook event payloads
//!
//! Every call is made on behalf of a user, identified by `open_id` and the
//! user's `access_token`, both carried on the request.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bytedance_sdk::douyin::{Douyin, DouyinCredentials};
//! use bytedance_sdk::douyin::video::VideoListRequest;
//! use bytedance_sdk::types::{ClientKey, ClientSecret};
//!
//! let douyin = Douyin::builder()
//!     .credentials(DouyinCredentials::new(
//!         ClientKey::new("awxxxxxxxx")?,
//!         ClientSecret::new("secret")?,
//!     ))
//!     .build()?;
//!
//! let videos = douyin
//!     .video()
//!     .list(&VideoListRequest::new("open_id", "access_token"))
//!     .await?;
//! ```

pub mod events;
pub mod search;
pub mod video;

use std::sync::Arc;

use crate::client::{ClientBuilder, Context, Platform};
use crate::types::{ClientKey, ClientSecret};

use self::search::SearchApi;
use self::video::{DouyinHost, ToutiaoHost, VideoApi, XiguaHost};

pub const DOUYIN_OPEN_BASE_URL: &str = "https://open.douyin.com";

#[derive(Debug, Clone)]
pub struct DouyinCredentials {
    client_key: ClientKey,
    client_secret: ClientSecret,
}

impl DouyinCredentials {
    pub fn new(client_key: ClientKey, client_secret: ClientSecret) -> Self {
        Self {
            client_key,
            client_secret,
        }
    }

    pub fn client_key(&self) -> &str {
        self.client_key.as_str()
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.as_str()
    }
}

pub type DouyinContext = Context<DouyinCredentials>;

/// Douyin open platform client
#[derive(Debug, Clone)]
pub struct Douyin {
    context: Arc<DouyinContext>,
}

impl Platform for Douyin {
    type Credentials = DouyinCredentials;
    const NAME: &'static str = "douyin";
    const DEFAULT_BASE_URL: &'static str = DOUYIN_OPEN_BASE_URL;

    fn from_context(context: Arc<Context<Self::Credentials>>) -> Self {
        Self { context }
    }
}

impl Douyin {
    pub fn builder() -> ClientBuilder<Douyin> {
        ClientBuilder::default()
    }

    pub fn client_key(&self) -> &str {
        self.context.credentials.client_key()
    }

    pub fn context(&self) -> &Arc<DouyinContext> {
        &self.context
    }

    /// Videos published to Douyin
    pub fn video(&self) -> VideoApi<DouyinHost> {
        VideoApi::new(self.context.clone())
    }

    /// Videos published to Toutiao
    pub fn toutiao_video(&self) -> VideoApi<ToutiaoHost> {
        VideoApi::new(self.context.clone())
    }

    /// Videos published to Xigua
    pub fn xigua_video(&self) -> VideoApi<XiguaHost> {
        VideoApi::new(self.context.clone())
    }

    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.context.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) const TEST_CLIENT_KEY: &str = "awtest1234567890";
    pub(crate) const TEST_CLIENT_SECRET: &str = "client_secret_0123456789";

    pub(crate) fn create_test_context(base_url: &str) -> Arc<DouyinContext> {
        Douyin::builder()
            .credentials(DouyinCredentials::new(
                ClientKey::new(TEST_CLIENT_KEY).unwrap(),
                ClientSecret::new(TEST_CLIENT_SECRET).unwrap(),
            ))
            .base_url(base_url)
            .build()
            .unwrap()
            .context
    }
}
