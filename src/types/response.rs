//! Response envelopes shared by the platform modules
//!
//! Every ByteDance API reports failures inside a `200 OK` body. The three
//! envelope shapes used across the open platforms are modelled here, and all
//! of them (plus the endpoint-specific responses elsewhere in the crate)
//! implement [`ApiResponse`] so callers can inspect errors uniformly.
//!
//! ```rust
//! use bytedance_sdk::types::{ApiResponse, MicroAppResponse};
//!
//! let json = r#"{"err_no": 40014, "err_tips": "bad params", "data": null}"#;
//! let resp: MicroAppResponse = serde_json::from_str(json).unwrap();
//! assert!(!resp.is_successful());
//! assert_eq!(resp.error_message(), "bad params");
//! assert!(resp.check().is_err());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ByteDanceError;

/// Loose payload used where a response body has no fixed schema.
pub type Payload = Map<String, Value>;

/// Uniform access to the error fields of any API response.
pub trait ApiResponse {
    /// Vendor error code; `0` means success.
    fn error_code(&self) -> i64;

    /// Vendor error message; empty on success.
    fn error_message(&self) -> &str;

    fn is_successful(&self) -> bool {
        self.error_code() == 0
    }

    /// Converts a non-zero error code into [`ByteDanceError::Api`].
    fn check(&self) -> Result<(), ByteDanceError> {
        ByteDanceError::check_api(self.error_code(), self.error_message())
    }
}

/// Envelope of the micro app (`/api/apps/...`) endpoints.
///
/// Newer endpoints report `err_no` + `err_msg` + `log_id`, older ones
/// `err_no` + `err_tips`; order endpoints use `err_code`.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MicroAppResponse<T = Value> {
    #[serde(default, alias = "err_code")]
    pub(crate) err_no: i64,
    #[serde(default)]
    pub(crate) err_tips: String,
    #[serde(default)]
    pub(crate) err_msg: String,
    /// Request trace id assigned by the platform
    #[serde(default)]
    pub log_id: Option<String>,
    /// Business payload, absent on most failures
    pub data: Option<T>,
}

impl<T> MicroAppResponse<T> {
    pub fn err_no(&self) -> i64 {
        self.err_no
    }

    /// Consumes the envelope, returning the payload on success.
    pub fn into_data(self) -> Result<Option<T>, ByteDanceError> {
        self.check()?;
        Ok(self.data)
    }
}

impl<T> ApiResponse for MicroAppResponse<T> {
    fn error_code(&self) -> i64 {
        self.err_no
    }

    fn error_message(&self) -> &str {
        if self.err_tips.is_empty() {
            &self.err_msg
        } else {
            &self.err_tips
        }
    }
}

/// Envelope of the Douyin open platform and TikTok (global) v1 endpoints:
/// `{"data": {"error_code": 0, "description": "", ...}, "extra": {...}}`.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenPlatformResponse<T = Payload> {
    pub data: OpenPlatformData<T>,
    /// Trace information (`logid`, `now`, sub error codes)
    #[serde(default)]
    pub extra: Option<Value>,
    /// Top-level message, e.g. `"success"` / `"error"`
    #[serde(default)]
    pub message: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenPlatformData<T> {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ApiResponse for OpenPlatformResponse<T> {
    fn error_code(&self) -> i64 {
        self.data.error_code
    }

    fn error_message(&self) -> &str {
        &self.data.description
    }
}

/// Envelope of the TikTok Shop endpoints.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShopResponse<T = Value> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request_id: String,
    pub data: Option<T>,
}

impl<T> ApiResponse for ShopResponse<T> {
    fn error_code(&self) -> i64 {
        self.code
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_micro_app_response_with_err_msg() {
        let resp: MicroAppResponse = serde_json::from_value(json!({
            "err_no": 0,
            "err_msg": "",
            "log_id": "2022092115392201020812109511046",
            "data": {"alias_list": ["a", "b"]}
        }))
        .unwrap();

        assert!(resp.is_successful());
        assert_eq!(resp.log_id.as_deref(), Some("2022092115392201020812109511046"));
        assert_eq!(resp.data.unwrap()["alias_list"][1], "b");
    }

    #[test]
    fn test_micro_app_response_err_code_alias() {
        let resp: MicroAppResponse = serde_json::from_value(json!({
            "err_code": 12001,
            "err_msg": "order not found"
        }))
        .unwrap();

        assert_eq!(resp.error_code(), 12001);
        assert_eq!(resp.error_message(), "order not found");
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_micro_app_response_into_data() {
        let ok: MicroAppResponse<i32> =
            serde_json::from_value(json!({"err_no": 0, "data": 7})).unwrap();
        assert_eq!(ok.into_data().unwrap(), Some(7));

        let failed: MicroAppResponse<i32> =
            serde_json::from_value(json!({"err_no": 40002, "err_tips": "bad secret"})).unwrap();
        assert!(matches!(
            failed.into_data(),
            Err(ByteDanceError::Api { code: 40002, .. })
        ));
    }

    #[test]
    fn test_open_platform_response_flattens_payload() {
        #[derive(Debug, Deserialize)]
        struct Item {
            item_id: String,
        }

        let resp: OpenPlatformResponse<Item> = serde_json::from_value(json!({
            "data": {"error_code": 0, "description": "", "item_id": "@9VwKzuuES8gmaXS"},
            "extra": {"logid": "2020"}
        }))
        .unwrap();

        assert!(resp.is_successful());
        assert_eq!(resp.data.payload.item_id, "@9VwKzuuES8gmaXS");
    }

    #[test]
    fn test_open_platform_response_error() {
        let resp: OpenPlatformResponse = serde_json::from_value(json!({
            "data": {"error_code": 2190008, "description": "access_token过期"},
            "message": "error"
        }))
        .unwrap();

        assert!(!resp.is_successful());
        assert_eq!(resp.error_message(), "access_token过期");
        assert_eq!(resp.message.as_deref(), Some("error"));
    }

    #[test]
    fn test_shop_response() {
        let resp: ShopResponse = serde_json::from_value(json!({
            "code": 36009004,
            "message": "Invalid parameter",
            "request_id": "202203070749000101890810281E8C70B7",
            "data": null
        }))
        .unwrap();

        assert_eq!(resp.error_code(), 36009004);
        assert!(resp.check().is_err());
    }
}
