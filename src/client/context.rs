//! API context and trait
//!
//! Provides the base trait and context shared by every endpoint group.

use std::sync::Arc;

use super::http_client::HttpClient;

/// Context holding shared resources for the endpoint groups of one platform.
///
/// `C` is the platform's credential type.
#[derive(Clone)]
pub struct Context<C> {
    pub(crate) client: Arc<HttpClient>,
    pub(crate) credentials: C,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Context<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("client", &self.client)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl<C> Context<C> {
    pub fn new(client: Arc<HttpClient>, credentials: C) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Get a reference to the HTTP client.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }
}

/// Trait implemented by every endpoint group.
pub trait ByteDanceApi: Send + Sync {
    type Credentials;

    fn context(&self) -> &Context<Self::Credentials>;

    /// Get the name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }

    fn client(&self) -> &HttpClient {
        self.context().client()
    }

    fn credentials(&self) -> &Self::Credentials {
        self.context().credentials()
    }
}
