//! Webhook event payloads
//!
//! Douyin posts events as `{"event": ..., "content": ...}` where `content`
//! is sometimes an object and sometimes the same object encoded as a JSON
//! string. [`WebhookEvent`] accepts both.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ByteDanceError;

#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct WebhookEvent<T = Value> {
    /// Event name, e.g. `authorize`
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub from_user_id: String,
    #[serde(default)]
    pub to_user_id: String,
    #[serde(default)]
    pub client_key: String,
    #[serde(deserialize_with = "content_from_object_or_string")]
    pub content: T,
    #[serde(default)]
    pub log_id: Option<String>,
}

impl<T: DeserializeOwned> WebhookEvent<T> {
    pub fn from_slice(body: &[u8]) -> Result<Self, ByteDanceError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Peeks at the event name without decoding the content.
pub fn event_name(body: &[u8]) -> Result<String, ByteDanceError> {
    #[derive(Deserialize)]
    struct Head {
        #[serde(default)]
        event: String,
    }

    let head: Head = serde_json::from_slice(body)?;
    Ok(head.event)
}

fn content_from_object_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        // Plain text content is kept as a string when `T` accepts one.
        Value::String(encoded) => serde_json::from_str(&encoded).or_else(|err| {
            serde_json::from_value(Value::String(encoded)).map_err(|_| D::Error::custom(err))
        }),
        value => serde_json::from_value(value).map_err(D::Error::custom),
    }
}

/// Content of the `authorize` event
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthorizeContent {
    #[serde(default)]
    pub scopes: Vec<String>,
}

pub type AuthorizeEvent = WebhookEvent<AuthorizeContent>;
