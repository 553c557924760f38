//! TikTok (global) open platform APIs
//!
//! Only OAuth token maintenance and QR code login are covered; see
//! [`oauth`].

pub mod oauth;

use std::sync::Arc;

use crate::client::{ClientBuilder, Context, Platform};
use crate::types::{ClientKey, ClientSecret};

use self::oauth::OAuthApi;

pub const TIKTOK_BASE_URL: &str = "https://open-api.tiktok.com";

#[derive(Debug, Clone)]
pub struct TikTokCredentials {
    client_key: ClientKey,
    client_secret: ClientSecret,
}

impl TikTokCredentials {
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

pub type TikTokContext = Context<TikTokCredentials>;

/// TikTok client
#[derive(Debug, Clone)]
pub struct TikTok {
    context: Arc<TikTokContext>,
}

impl Platform for TikTok {
    type Credentials = TikTokCredentials;
    const NAME: &'static str = "tiktok";
    const DEFAULT_BASE_URL: &'static str = TIKTOK_BASE_URL;

    fn from_context(context: Arc<Context<Self::Credentials>>) -> Self {
        Self { context }
    }
}

impl TikTok {
    pub fn builder() -> ClientBuilder<TikTok> {
        ClientBuilder::default()
    }

    pub fn context(&self) -> &Arc<TikTokContext> {
        &self.context
    }

    pub fn oauth(&self) -> OAuthApi {
        OAuthApi::new(self.context.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) const TEST_CLIENT_KEY: &str = "aw_global_key";
    pub(crate) const TEST_CLIENT_SECRET: &str = "global_secret_0123";

    pub(crate) fn create_test_context(base_url: &str) -> Arc<TikTokContext> {
        TikTok::builder()
            .credentials(TikTokCredentials::new(
                ClientKey::new(TEST_CLIENT_KEY).unwrap(),
                ClientSecret::new(TEST_CLIENT_SECRET).unwrap(),
            ))
            .base_url(base_url)
            .build()
            .unwrap()
            .context
    }
}
