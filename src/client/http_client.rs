//! ByteDance HTTP Client
//!
//! Provides the HTTP client wrapper shared by every platform facade.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use http::header::CONTENT_TYPE;
use http::Method;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tower::Service;

use crate::error::{ByteDanceError, HttpError};

use super::request::{ApiRequest, RequestBody};

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Raw body of an endpoint that may answer with binary content.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("json"))
    }
}

/// ByteDance API Client
///
/// Reusable HTTP client bound to one open platform endpoint.
/// Built with reqwest for async HTTP requests.
#[derive(Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Note: requests made through this client bypass the middleware pipeline.
    /// Use [`execute`](Self::execute) for middleware-aware requests.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// Turns an [`ApiRequest`] into a `reqwest::Request` against the base URL.
    ///
    /// GET requests never carry a body.
    pub fn build_request(&self, request: ApiRequest) -> Result<reqwest::Request, ByteDanceError> {
        let (method, path, query, headers, body) = request.into_parts();
        let url = self.url_for(&path);

        let mut builder = self.http.request(method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        if method != Method::GET {
            builder = match body {
                RequestBody::Empty => builder,
                RequestBody::Json(bytes) => builder
                    .header(CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(bytes),
                RequestBody::Multipart(form) => builder.multipart(form),
            };
        }

        Ok(builder.build()?)
    }

    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ByteDanceError> {
        debug!("[ByteDance] {} {}", request.method(), request.path());

        let request = self.build_request(request)?;
        let response = self.send_request(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("[ByteDance] HTTP {} from {}", status.as_u16(), self.base_url);
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    /// Send a request and decode the JSON response body into `T`.
    ///
    /// # Errors
    /// - `ByteDanceError::Http` for transport failures, non-2xx statuses or
    ///   bodies that do not decode into `T`
    ///
    /// API error codes are left in the decoded model.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ByteDanceError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ByteDanceError::Http(HttpError::Decode(e.to_string())))
    }

    /// Send a request and return the undecoded body.
    pub async fn execute_raw(&self, request: ApiRequest) -> Result<RawResponse, ByteDanceError> {
        let response = self.send(request).await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Make a GET request with the given query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ByteDanceError> {
        let request = query
            .iter()
            .fold(ApiRequest::get(path), |req, (k, v)| req.query(k, v));
        self.execute(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ByteDanceError> {
        self.execute(ApiRequest::post(path).json(body)?).await
    }
}

impl Service<reqwest::Request> for HttpClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for HttpClient
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Set the base URL for API calls
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the HttpClient
    ///
    /// # Errors
    /// Returns an error if the base URL is missing or not an http(s) URL
    pub fn build(self) -> Result<HttpClient, ByteDanceError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ByteDanceError::Config("base_url is required".to_string()))?;

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ByteDanceError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(HttpClient {
            http: client,
            base_url,
            middleware_executor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpClient {
        HttpClient::builder().base_url(base_url).build().unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = HttpClient::builder().build();
        assert!(matches!(result, Err(ByteDanceError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let result = HttpClient::builder().base_url("ftp://example.com").build();
        assert!(matches!(result, Err(ByteDanceError::Config(_))));
    }

    #[test]
    fn test_builder_custom_timeouts() {
        let client = HttpClient::builder()
            .base_url("https://developer.toutiao.com/api")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://developer.toutiao.com/api");
    }

    #[test]
    fn test_build_request_joins_base_url() {
        let client = client("https://developer.toutiao.com/api/");
        let request = client
            .build_request(ApiRequest::get("/apps/v1/capacity/query_alias_list").query("a", "b c"))
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://developer.toutiao.com/api/apps/v1/capacity/query_alias_list?a=b+c"
        );
    }

    #[test]
    fn test_build_request_absolute_path() {
        let client = client("https://open-api.tiktokglobalshop.com/api");
        let request = client
            .build_request(ApiRequest::get("https://auth.tiktok-shops.com/api/token/get"))
            .unwrap();

        assert_eq!(request.url().host_str(), Some("auth.tiktok-shops.com"));
    }

    #[test]
    fn test_build_request_get_drops_body() {
        let client = client("https://open.douyin.com");
        let request = client
            .build_request(
                ApiRequest::get("/video/list")
                    .json(&serde_json::json!({"ignored": true}))
                    .unwrap(),
            )
            .unwrap();

        assert!(request.body().is_none());
    }

    #[test]
    fn test_build_request_json_headers() {
        let client = client("https://open.douyin.com");
        let request = client
            .build_request(
                ApiRequest::post("/video/data")
                    .header("access-token", "tok")
                    .json(&serde_json::json!({"item_ids": []}))
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(request.headers()["access-token"], "tok");
        assert!(request.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/json"));
    }

    #[test]
    fn test_raw_response_is_json() {
        let raw = RawResponse {
            status: 200,
            content_type: Some("application/json; charset=utf-8".into()),
            body: Vec::new(),
        };
        assert!(raw.is_json());

        let raw = RawResponse {
            content_type: Some("image/png".into()),
            ..raw
        };
        assert!(!raw.is_json());
    }
}
