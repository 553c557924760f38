use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use serde::Deserialize;
use tower::{Layer, Service};

use crate::error::ByteDanceError;

use super::context::Context;
use super::http_client::{HttpClient, MiddlewareExecutor};

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>;

/// An open platform served by this crate.
///
/// Each facade (`MicroApp`, `Douyin`, `TikTok`, `TikTokShop`) implements
/// this trait so they all share [`ClientBuilder`].
pub trait Platform: Sized {
    type Credentials: Clone + Send + Sync + 'static;

    /// Used in log lines and configuration errors.
    const NAME: &'static str;

    const DEFAULT_BASE_URL: &'static str;

    fn from_context(context: Arc<Context<Self::Credentials>>) -> Self;
}

/// Transport settings that can be loaded from a configuration file.
///
/// ```rust
/// use bytedance_sdk::client::ClientOptions;
///
/// let options: ClientOptions =
///     serde_json::from_str(r#"{"base_url": "https://open.douyin.com/api", "timeout_secs": 5}"#)
///         .unwrap();
/// assert_eq!(options.timeout_secs, Some(5));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

#[must_use]
pub struct ClientBuilder<P: Platform, M = ()> {
    credentials: Option<P::Credentials>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
    platform: PhantomData<fn() -> P>,
}

impl<P: Platform> Default for ClientBuilder<P> {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: None,
            timeout: None,
            connect_timeout: None,
            middleware: None,
            platform: PhantomData,
        }
    }
}

impl<P: Platform, M> std::fmt::Debug for ClientBuilder<P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("platform", &P::NAME)
            .field("credentials", &self.credentials.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<P: Platform, M> ClientBuilder<P, M> {
    pub fn credentials(mut self, credentials: P::Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Applies every setting present in `options`.
    pub fn options(mut self, options: ClientOptions) -> Self {
        if let Some(base_url) = options.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(secs) = options.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = options.connect_timeout_secs {
            self.connect_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> ClientBuilder<P, M2>
    where
        M2: Layer<HttpClient> + Clone + Send + Sync + 'static,
    {
        ClientBuilder {
            credentials: self.credentials,
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
            platform: PhantomData,
        }
    }

    pub fn build(self) -> Result<P, ByteDanceError>
    where
        M: Layer<HttpClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let credentials = self.credentials.ok_or_else(|| {
            ByteDanceError::Config(format!("{} credentials are required", P::NAME))
        })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| P::DEFAULT_BASE_URL.to_string());

        let mut builder = HttpClient::builder().base_url(base_url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let mut client = builder.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let context = Arc::new(Context::new(Arc::new(client), credentials));
        Ok(P::from_context(context))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| -> MiddlewareFuture {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
