use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use http::StatusCode;
use log::{debug, info, warn};
use reqwest::{Request, Response};
use tower::{Layer, Service};

/// Logs every outgoing request and its response status through `log`.
///
/// Credentials in the query string are replaced by `[REDACTED]`; the
/// `access-token` header is never printed.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at `debug!` level, including status text and request headers of interest.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

/// Query parameters whose values never reach the log output.
const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "app_secret",
    "secret",
    "client_secret",
    "refresh_token",
    "session_key",
    "code",
    "auth_code",
    "anonymous_code",
    "sign",
    "token",
];

const REDACTED: &str = "[REDACTED]";

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_FIELDS
        .iter()
        .any(|field| key.eq_ignore_ascii_case(field))
}

impl<S> LoggingMiddlewareService<S> {
    fn redact_url(url: &str) -> String {
        let Some((base, query)) = url.split_once('?') else {
            return url.to_string();
        };

        let query = query
            .split('&')
            .map(|param| match param.split_once('=') {
                Some((key, _)) if is_sensitive(key) => format!("{key}={REDACTED}"),
                _ => param.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{base}?{query}")
    }

    fn log_request(req: &Request, verbose: bool) {
        let safe_url = Self::redact_url(req.url().as_str());
        if verbose {
            let has_token = req.headers().contains_key("access-token");
            debug!(
                "[ByteDance] >>> {} {} (access-token: {})",
                req.method(),
                safe_url,
                if has_token { REDACTED } else { "-" }
            );
        } else {
            info!("[ByteDance] {} {}", req.method(), safe_url);
        }
    }

    fn log_response(status: u16, duration: Duration, verbose: bool) {
        if status >= 400 {
            warn!("[ByteDance] <<< {} ({:?})", status, duration);
        } else if verbose {
            debug!(
                "[ByteDance] <<< {} - {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else {
            info!("[ByteDance] {} ({:?})", status, duration);
        }
    }

    fn status_text(status: u16) -> &'static str {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let verbose = self.verbose;
        Self::log_request(&req, verbose);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let start = Instant::now();
            let response = inner.call(req).await?;
            Self::log_response(response.status().as_u16(), start.elapsed(), verbose);

            Ok(response)
        })
    }
}
