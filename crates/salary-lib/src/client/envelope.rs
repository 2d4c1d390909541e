//! Response interpretation shared by every endpoint
//!
//! The service wraps payloads as `{"status": "success", "data": ...}` or
//! reports failures as `{"status": "error", "message": ...}`. Some endpoints
//! return the payload bare. All of them go through [`interpret`].

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const ENVELOPE_KEYS: [&str; 3] = ["status", "message", "error"];

/// Media types accepted as JSON: `application/json` and any `+json` suffix
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Read a response to completion and interpret it
pub(crate) async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await.map_err(ClientError::from_send)?;

    interpret(status, &content_type, &body)
}

/// Turn a raw HTTP response into a typed payload or a classified error.
///
/// Order matters: the status code is checked first, then the content type,
/// then the envelope.
pub fn interpret<T: DeserializeOwned>(
    status: u16,
    content_type: &str,
    body: &str,
) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(Value::as_object)
            .and_then(message_of)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        return Err(ClientError::HttpStatus { status, message });
    }

    if !is_json_content_type(content_type) {
        let content_type = if content_type.is_empty() {
            "none".to_string()
        } else {
            content_type.to_string()
        };
        return Err(ClientError::UnexpectedContentType { content_type });
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::MalformedBody(format!("invalid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| ClientError::MalformedBody("expected a JSON object".to_string()))?;
    let data = object.get("data").filter(|d| !d.is_null());

    match object.get("status").and_then(Value::as_str) {
        Some("success") => match data {
            Some(data) => decode(data.clone()),
            None => Err(ClientError::MalformedBody(
                "success response carried no data".to_string(),
            )),
        },
        Some("error") => Err(ClientError::Service(
            message_of(object).unwrap_or_else(|| "The service reported an error".to_string()),
        )),
        _ => match data {
            Some(data) => decode(data.clone()),
            None if has_payload_fields(object) => decode(value.clone()),
            None => Err(ClientError::MalformedBody(
                "response carried no payload".to_string(),
            )),
        },
    }
}

fn message_of(object: &Map<String, Value>) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

fn has_payload_fields(object: &Map<String, Value>) -> bool {
    object.keys().any(|k| !ENVELOPE_KEYS.contains(&k.as_str()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::MalformedBody(format!("unexpected payload shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    const JSON: &str = "application/json";

    #[test]
    fn test_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("text/plain; charset=utf-8"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let p: Payload = interpret(200, JSON, r#"{"status":"success","data":{"value":7}}"#).unwrap();
        assert_eq!(p, Payload { value: 7 });
    }

    #[test]
    fn test_success_without_data_is_malformed() {
        let err = interpret::<Payload>(200, JSON, r#"{"status":"success"}"#).unwrap_err();
        assert!(matches!(err, ClientError::MalformedBody(_)));
    }

    #[test]
    fn test_error_status_carries_service_message() {
        let body = r#"{"status":"error","message":"Experience level not recognized"}"#;
        let err = interpret::<Payload>(200, JSON, body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.to_string(), "Experience level not recognized");
    }

    #[test]
    fn test_error_status_without_message() {
        let err = interpret::<Payload>(200, JSON, r#"{"status":"error"}"#).unwrap_err();
        assert_eq!(err.to_string(), "The service reported an error");
    }

    #[test]
    fn test_non_2xx_prefers_message_then_error() {
        let body = r#"{"error":"Validation error","message":"Job title is required","status":"error"}"#;
        match interpret::<Payload>(400, JSON, body).unwrap_err() {
            ClientError::HttpStatus { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Job title is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = interpret::<Payload>(503, JSON, r#"{"error":"Model not available"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Model not available");
    }

    #[test]
    fn test_non_2xx_without_body_uses_generic_message() {
        let err = interpret::<Payload>(502, "text/html", "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 502");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_html_body_is_unexpected_content_type() {
        let err = interpret::<Payload>(200, "text/html; charset=utf-8", "<!doctype html>").unwrap_err();
        match err {
            ClientError::UnexpectedContentType { content_type } => {
                assert_eq!(content_type, "text/html; charset=utf-8")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bare_payload_accepted() {
        let p: Payload = interpret(200, JSON, r#"{"value":3}"#).unwrap();
        assert_eq!(p.value, 3);

        let p: Payload = interpret(200, JSON, r#"{"status":"healthy","value":4}"#).unwrap();
        assert_eq!(p.value, 4);
    }

    #[test]
    fn test_unknown_status_with_data_uses_data() {
        let p: Payload = interpret(200, JSON, r#"{"status":"partial","data":{"value":9}}"#).unwrap();
        assert_eq!(p.value, 9);
    }

    #[test]
    fn test_envelope_keys_alone_are_malformed() {
        let err = interpret::<Payload>(200, JSON, r#"{"message":"ok"}"#).unwrap_err();
        assert!(matches!(err, ClientError::MalformedBody(_)));
    }

    #[test]
    fn test_wrong_shape_and_bad_json() {
        let err = interpret::<Payload>(200, JSON, r#"{"status":"success","data":{"value":"x"}}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::MalformedBody(_)));

        let err = interpret::<Payload>(200, JSON, "not json").unwrap_err();
        assert!(matches!(err, ClientError::MalformedBody(_)));

        let err = interpret::<Payload>(200, JSON, "[1,2]").unwrap_err();
        assert!(matches!(err, ClientError::MalformedBody(_)));
    }
}
