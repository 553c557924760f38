//! Middleware components for the ByteDance SDK.
//!
//! Any [`tower::Layer`] over [`HttpClient`](crate::client::HttpClient) can be
//! plugged into a platform builder with `with_middleware`; every request the
//! SDK sends then flows through the layered service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bytedance_sdk::middleware::LoggingMiddleware;
//! use bytedance_sdk::micro_app::{MicroApp, MicroAppCredentials};
//!
//! let app = MicroApp::builder()
//!     .credentials(MicroAppCredentials::new(app_id, app_secret))
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
