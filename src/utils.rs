use std::fmt::Display;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serializer;
use uuid::Uuid;

/// Random file name (`<32 lowercase hex>.<ext>`) for uploads without one.
pub(crate) fn random_file_name(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4().simple(), extension)
}

/// Joins ids into the comma separated form used by list filters.
pub(crate) fn join_comma<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Serializes raw bytes as a standard base64 string.
pub(crate) fn serialize_base64<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_file_name_shape() {
        let name = random_file_name("jpg");
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(ext, "jpg");
        assert_eq!(stem.len(), 32);
        assert!(stem.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_random_file_name_unique() {
        assert_ne!(random_file_name("mp4"), random_file_name("mp4"));
    }

    #[test]
    fn test_join_comma() {
        assert_eq!(join_comma(&[1, 22, 333]), "1,22,333");
        assert_eq!(join_comma::<i32>(&[]), "");
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        assert!(unix_timestamp() > 1_600_000_000);
    }

    #[test]
    fn test_serialize_base64() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_base64")]
            data: Vec<u8>,
        }

        let json = serde_json::to_string(&Wrapper {
            data: b"hello".to_vec(),
        })
        .unwrap();
        assert_eq!(json, r#"{"data":"aGVsbG8="}"#);
    }
}
