//! Request signing for TikTok Shop
//!
//! The signature is the lowercase hex HMAC-SHA256, keyed with the app secret,
//! of
//!
//! ```text
//! app_secret + path + k1 + v1 + k2 + v2 + ... + app_secret
//! ```
//!
//! where `path` is the full request path (including the `/api` prefix) and
//! the query parameters are sorted by key, excluding `sign` and
//! `access_token`.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ByteDanceError;

type HmacSha256 = Hmac<Sha256>;

const EXCLUDED_KEYS: [&str; 2] = ["sign", "access_token"];

/// Builds the string that gets signed.
pub fn string_to_sign(app_secret: &str, path: &str, params: &[(String, String)]) -> String {
    let sorted: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(key, _)| !EXCLUDED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    let mut input = String::with_capacity(app_secret.len() * 2 + path.len() + 64);
    input.push_str(app_secret);
    input.push_str(path);
    for (key, value) in sorted {
        input.push_str(key);
        input.push_str(value);
    }
    input.push_str(app_secret);
    input
}

/// Computes the `sign` query parameter.
pub fn sign(
    app_secret: &str,
    path: &str,
    params: &[(String, String)],
) -> Result<String, ByteDanceError> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| ByteDanceError::Signature(format!("Invalid app_secret: {e}")))?;
    mac.update(string_to_sign(app_secret, path, params).as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_string_to_sign_sorts_and_excludes() {
        let input = string_to_sign(
            "secret",
            "/api/fulfillment/detail",
            &params(&[
                ("timestamp", "1700000000"),
                ("app_key", "key"),
                ("access_token", "tok"),
                ("sign", "old"),
                ("package_id", "pkg_1"),
            ]),
        );

        assert_eq!(
            input,
            "secret/api/fulfillment/detailapp_keykeypackage_idpkg_1timestamp1700000000secret"
        );
    }

    #[test]
    fn test_sign_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_sign_is_deterministic_and_order_independent() {
        let a = sign(
            "secret",
            "/api/fulfillment/search",
            &params(&[("app_key", "key"), ("timestamp", "1"), ("version", "202212")]),
        )
        .unwrap();
        let b = sign(
            "secret",
            "/api/fulfillment/search",
            &params(&[("version", "202212"), ("timestamp", "1"), ("app_key", "key")]),
        )
        .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_ignores_access_token() {
        let base = params(&[("app_key", "key"), ("timestamp", "1")]);
        let mut with_token = base.clone();
        with_token.push(("access_token".into(), "tok".into()));

        assert_eq!(
            sign("secret", "/api/x", &base).unwrap(),
            sign("secret", "/api/x", &with_token).unwrap()
        );
    }

    #[test]
    fn test_sign_depends_on_path_and_secret() {
        let p = params(&[("app_key", "key")]);
        let base = sign("secret", "/api/a", &p).unwrap();

        assert_ne!(base, sign("secret", "/api/b", &p).unwrap());
        assert_ne!(base, sign("other", "/api/a", &p).unwrap());
    }
}
