//! ByteDance HTTP Client module
//!
//! This module contains the shared HTTP client, the request descriptor and
//! the generic platform builder.

mod http_client;
pub use http_client::{HttpClient, HttpClientBuilder, RawResponse};

mod request;
pub use request::{ApiRequest, RequestBody};

mod builder;
pub use builder::{ClientBuilder, ClientOptions, Platform};

mod context;
pub use context::{ByteDanceApi, Context};
