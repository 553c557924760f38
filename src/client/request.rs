//! Request descriptor
//!
//! [`ApiRequest`] captures everything an endpoint method decides about a
//! call (verb, path, query, headers, body) before [`HttpClient`] turns it
//! into a `reqwest::Request` against its base URL.
//!
//! [`HttpClient`]: super::HttpClient

use http::Method;
use reqwest::multipart::Form;
use serde::Serialize;

use crate::error::ByteDanceError;

/// Header carrying the caller's access token on most micro app and Douyin
/// endpoints.
const ACCESS_TOKEN_HEADER: &str = "access-token";

pub enum RequestBody {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(bytes) => write!(f, "Json({} bytes)", bytes.len()),
            RequestBody::Multipart(_) => f.write_str("Multipart(..)"),
        }
    }
}

/// A single API call, relative to the client's base URL.
#[must_use]
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    /// `path` is appended to the base URL unless it is already absolute.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn header_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    pub(crate) fn access_token(self, access_token: &str) -> Self {
        self.header(ACCESS_TOKEN_HEADER, access_token)
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ByteDanceError> {
        self.body = RequestBody::Json(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Method,
        String,
        Vec<(String, String)>,
        Vec<(String, String)>,
        RequestBody,
    ) {
        (self.method, self.path, self.query, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_opt_skips_none() {
        let request = ApiRequest::get("/apps/v1/data_analysis/query_live_room")
            .query_opt("anchor_name", None::<&str>)
            .query("page_num", 1)
            .query_opt("host_name", Some("douyin"));

        assert_eq!(request.query_value("anchor_name"), None);
        assert_eq!(request.query_value("page_num"), Some("1"));
        assert_eq!(request.query_value("host_name"), Some("douyin"));
        assert_eq!(request.query_pairs().len(), 2);
    }

    #[test]
    fn test_access_token_header() {
        let request = ApiRequest::get("/apps/v1/capacity/query_alias_list").access_token("tok");
        assert_eq!(
            request.headers(),
            &[("access-token".to_string(), "tok".to_string())]
        );
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::post("/apps/v2/token")
            .json(&serde_json::json!({"appid": "tt1"}))
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        match request.body() {
            RequestBody::Json(bytes) => assert_eq!(bytes.as_slice(), br#"{"appid":"tt1"}"#),
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
