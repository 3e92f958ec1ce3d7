//! Wire protocol messages exchanged over the Unix socket.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single client command. Anything that does not decode into this shape
/// is answered with the plain-text misunderstood reply.
#[derive(Debug, Deserialize)]
pub struct Command {
    /// The URL to resolve, used verbatim as the cache key.
    pub text: String,
}

/// Outcome of a successful redirect probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnshortenInfo {
    pub redirects_to: String,
    pub redirected_to_same_host: bool,
}

/// Reply written back to the client, one per connection.
#[derive(Debug, Serialize)]
pub struct UnshortenResponse {
    /// `{}` on the wire when no redirect was found.
    #[serde(serialize_with = "empty_object_if_none")]
    pub unshorten_info: Option<UnshortenInfo>,
    pub is_cached: bool,
    /// Wall-clock seconds spent resolving the URL.
    pub time_taken: f64,
}

fn empty_object_if_none<S>(info: &Option<UnshortenInfo>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match info {
        Some(info) => info.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_requires_text_field() {
        assert!(serde_json::from_str::<Command>(r#"{"text": "http://a/b"}"#).is_ok());
        assert!(serde_json::from_str::<Command>(r#"{"foo": "bar"}"#).is_err());
        assert!(serde_json::from_str::<Command>("not json").is_err());
    }

    #[test]
    fn test_response_with_redirect_serializes_info() {
        let response = UnshortenResponse {
            unshorten_info: Some(UnshortenInfo {
                redirects_to: "http://real.example/y".to_string(),
                redirected_to_same_host: false,
            }),
            is_cached: false,
            time_taken: 0.25,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert_eq!(
            value["unshorten_info"]["redirects_to"],
            "http://real.example/y"
        );
        assert_eq!(value["unshorten_info"]["redirected_to_same_host"], false);
        assert_eq!(value["is_cached"], false);
    }

    #[test]
    fn test_response_without_redirect_serializes_empty_object() {
        let response = UnshortenResponse {
            unshorten_info: None,
            is_cached: false,
            time_taken: 0.0,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
        assert_eq!(value["unshorten_info"], serde_json::json!({}));
    }
}
