//! Micro app authentication API
//!
//! - `POST /apps/v2/token` - server access token (`client_credential`)
//! - `POST /apps/v2/jscode2session` - exchange a `tt.login` code for a session
//!
//! Both endpoints take `appid` + `secret` in the body; when a request leaves
//! them unset, the client's credentials are used.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{ApiRequest, ByteDanceApi};
use crate::error::ByteDanceError;
use crate::types::MicroAppResponse;

use super::{MicroAppContext, MicroAppCredentials};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenRequest {
    /// Defaults to the client's app id
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Defaults to the client's app secret
    #[serde(rename = "secret", skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,
    pub grant_type: String,
}

impl Default for AccessTokenRequest {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            grant_type: "client_credential".to_string(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessTokenData {
    #[serde(default)]
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,
    /// Absolute expiry, unix seconds
    #[serde(default, rename = "expiresAt")]
    pub expires_at: i64,
}

pub type AccessTokenResponse = MicroAppResponse<AccessTokenData>;

/// Either `code` or `anonymous_code` must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeToSessionRequest {
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(rename = "secret", skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,
    /// Code returned by `tt.login`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Anonymous code returned by `tt.login`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_code: Option<String>,
}

impl CodeToSessionRequest {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CodeToSessionData {
    #[serde(default)]
    pub session_key: String,
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub anonymous_openid: String,
    #[serde(default)]
    pub unionid: String,
}

pub type CodeToSessionResponse = MicroAppResponse<CodeToSessionData>;

/// Micro app authentication API
pub struct AuthApi {
    context: Arc<MicroAppContext>,
}

impl AuthApi {
    pub fn new(context: Arc<MicroAppContext>) -> Self {
        Self { context }
    }

    /// POST /apps/v2/token
    pub async fn access_token(
        &self,
        request: &AccessTokenRequest,
    ) -> Result<AccessTokenResponse, ByteDanceError> {
        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.credentials().fill_app_secret(&mut body.app_secret);

        let request = ApiRequest::post("/apps/v2/token").json(&body)?;
        self.client().execute(request).await
    }

    /// POST /apps/v2/jscode2session
    ///
    /// # Errors
    /// `InvalidArgument` when neither `code` nor `anonymous_code` is set.
    pub async fn code_to_session(
        &self,
        request: &CodeToSessionRequest,
    ) -> Result<CodeToSessionResponse, ByteDanceError> {
        if request.code.is_none() && request.anonymous_code.is_none() {
            return Err(ByteDanceError::InvalidArgument(
                "code or anonymous_code is required".to_string(),
            ));
        }

        let mut body = request.clone();
        self.credentials().fill_app_id(&mut body.app_id);
        self.credentials().fill_app_secret(&mut body.app_secret);

        let request = ApiRequest::post("/apps/v2/jscode2session").json(&body)?;
        self.client().execute(request).await
    }
}

impl ByteDanceApi for AuthApi {
    type Credentials = MicroAppCredentials;

    fn context(&self) -> &MicroAppContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "auth"
    }
}
