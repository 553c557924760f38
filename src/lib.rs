//! ByteDance open platform SDK for Rust
//!
//! Typed async clients for the ByteDance family of server-side APIs.
//!
//! ## API Coverage
//!
//! | Platform | Module | Endpoint groups |
//! |----------|--------|-----------------|
//! | Douyin / Toutiao micro apps | [`micro_app`] | auth, capacity, category, data analysis, content, customer service, live, order, task box, product, auth entity |
//! | Douyin open platform | [`douyin`] | video publishing (Douyin, Toutiao, Xigua), search comments, webhook events |
//! | TikTok (global) | [`tiktok`] | OAuth tokens, QR code login |
//! | TikTok Shop | [`tiktok_shop`] | seller auth, fulfillment (signed) |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bytedance_sdk::micro_app::{MicroApp, MicroAppCredentials};
//! use bytedance_sdk::micro_app::auth::CodeToSessionRequest;
//! use bytedance_sdk::types::{ApiResponse, AppId, AppSecret};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = MicroApp::builder()
//!         .credentials(MicroAppCredentials::new(
//!             AppId::new("tt1234567890abcdef")?,
//!             AppSecret::new("your_secret")?,
//!         ))
//!         .build()?;
//!
//!     // Exchange the code from tt.login()
//!     let session = app
//!         .auth()
//!         .code_to_session(&CodeToSessionRequest::with_code("code_from_client"))
//!         .await?;
//!     session.check()?;
//!     println!("OpenID: {:?}", session.data.map(|d| d.openid));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] - HTTP client, request model and platform builders
//! - [`error`] - Error types
//! - [`middleware`] - tower middleware (request logging)
//! - [`types`] - credential newtypes, response envelopes, upload files
//!
//! ## Error Handling
//!
//! API error codes are returned inside the response model, not as `Err`.
//! [`ByteDanceError`] covers transport failures, non-2xx statuses, decode
//! errors and argument checks made before a request is sent:
//!
//! ```rust,ignore
//! use bytedance_sdk::ByteDanceError;
//! use bytedance_sdk::types::ApiResponse;
//!
//! match result {
//!     Ok(response) if !response.is_successful() => {
//!         eprintln!("API error: {} - {}", response.error_code(), response.error_message());
//!     }
//!     Ok(response) => { /* handle success */ }
//!     Err(ByteDanceError::Http(e)) => {
//!         eprintln!("HTTP error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod client;
pub mod douyin;
pub mod error;
pub mod micro_app;
pub mod middleware;
pub mod tiktok;
pub mod tiktok_shop;
pub mod types;
mod utils;

pub use client::{ClientBuilder, ClientOptions, HttpClient};
pub use douyin::Douyin;
pub use error::{ByteDanceError, HttpError};
pub use micro_app::MicroApp;
pub use middleware::LoggingMiddleware;
pub use tiktok::TikTok;
pub use tiktok_shop::TikTokShop;
