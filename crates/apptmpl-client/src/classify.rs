//! Response body interpretation.
//!
//! Pure functions over `(status, content type, body)`: decoding successful
//! bodies and classifying failed ones into a [`ResponseError`]. No I/O happens
//! here, the executor reads the body and hands it over.

use serde_json::Value;

use crate::error::{Error, ResponseError, Result};
use crate::types::{ApiErr, Payload};

/// Media types the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// `application/json`
    Json,
    /// `text/plain`
    Text,
}

impl MediaType {
    /// The canonical header value.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Text => "text/plain",
        }
    }

    /// Match a `Content-Type` header value on its essence, ignoring parameters.
    pub fn from_header(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(MediaType::Json.as_str()) {
            Some(MediaType::Json)
        } else if essence.eq_ignore_ascii_case(MediaType::Text.as_str()) {
            Some(MediaType::Text)
        } else {
            None
        }
    }
}

/// Decode the body of a 2xx response.
pub fn decode_success(status: u16, content_type: Option<&str>, body: &str) -> Result<Payload> {
    let Some(content_type) = content_type else {
        return Ok(Payload::Empty);
    };
    if status == 204 {
        return Ok(Payload::Empty);
    }
    match MediaType::from_header(content_type) {
        Some(MediaType::Json) => Ok(Payload::Json(serde_json::from_str(body)?)),
        Some(MediaType::Text) => Ok(Payload::Text(body.to_string())),
        None => Err(Error::UnrecognizedContentType(content_type.to_string())),
    }
}

/// Classify a failed response.
///
/// The variant depends only on the content type and, for JSON, on whether the
/// body has the `msg`/`code`/`request_id` shape. The status is carried along
/// but never decides the variant. Anything other than JSON or plain text is
/// reported as [`Error::UnrecognizedContentType`].
pub fn classify(status: u16, content_type: Option<&str>, body: &str) -> Result<ResponseError> {
    match content_type.and_then(MediaType::from_header) {
        Some(MediaType::Json) => {
            let payload: Value = serde_json::from_str(body)?;
            Ok(match serde_json::from_value::<ApiErr>(payload.clone()) {
                Ok(err) => server_error(err, status),
                Err(_) => ResponseError::Payload { status, payload },
            })
        }
        Some(MediaType::Text) => Ok(ResponseError::Response {
            status,
            message: body.to_string(),
        }),
        None => Err(Error::UnrecognizedContentType(
            content_type.unwrap_or("<none>").to_string(),
        )),
    }
}

fn server_error(err: ApiErr, status: u16) -> ResponseError {
    ResponseError::Server {
        status,
        name: error_name(&err.code),
        message: err.msg,
        code: err.code,
        data: err.data,
        request_id: err.request_id,
    }
}

/// Derive a display name from an error code.
///
/// `rate_limit_exceeded` becomes `RateLimitExceededError`. A code whose last
/// segment is already `error` is not suffixed twice, so `basic_error` becomes
/// `BasicError`. An empty code becomes `UnknownError`.
pub fn error_name(code: &str) -> String {
    let code = if code.is_empty() { "unknown" } else { code };
    let mut name: String = code.split('_').map(capitalize).collect();
    if !name.ends_with("Error") {
        name.push_str("Error");
    }
    name
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, GENERIC_ERROR_NAME};
    use serde_json::json;

    #[test]
    fn test_error_name() {
        assert_eq!(error_name("rate_limit_exceeded"), "RateLimitExceededError");
        assert_eq!(error_name("basic_error"), "BasicError");
        assert_eq!(error_name("server"), "ServerError");
        assert_eq!(error_name("invalid_auth"), "InvalidAuthError");
        assert_eq!(error_name(""), "UnknownError");
    }

    #[test]
    fn test_media_type_matches_essence() {
        assert_eq!(MediaType::from_header("application/json"), Some(MediaType::Json));
        assert_eq!(
            MediaType::from_header("application/json; charset=utf-8"),
            Some(MediaType::Json)
        );
        assert_eq!(MediaType::from_header("Text/Plain"), Some(MediaType::Text));
        assert_eq!(MediaType::from_header("text/html"), None);
    }

    #[test]
    fn test_classify_structured_error() {
        let body = r#"{"msg":"boom","code":"basic_error","request_id":"r-1"}"#;
        let err = classify(500, Some("application/json"), body).unwrap();
        match err {
            ResponseError::Server {
                status,
                name,
                message,
                request_id,
                data,
                ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(name, "BasicError");
                assert_eq!(message, "boom");
                assert_eq!(request_id, "r-1");
                assert!(data.is_none());
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_structured_error_with_data() {
        let body = json!({
            "msg": "something bad happened",
            "code": "server",
            "data": {"a": "ayy", "b": true, "c": 622},
            "request_id": "abc"
        })
        .to_string();
        let err = classify(500, Some("application/json"), &body).unwrap();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.name(), "ServerError");
        match err {
            ResponseError::Server { data, .. } => {
                assert_eq!(data, Some(json!({"a": "ayy", "b": true, "c": 622})));
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unstructured_json_preserves_payload() {
        for body in [
            json!({"err": "a different error response"}),
            json!({"msg": "m", "code": "c"}),
            json!({"code": "c", "request_id": "r"}),
            json!(["not", "an", "object"]),
        ] {
            let err = classify(500, Some("application/json"), &body.to_string()).unwrap();
            assert_eq!(err.kind(), ErrorKind::Payload);
            assert_eq!(err.name(), GENERIC_ERROR_NAME);
            match err {
                ResponseError::Payload { status, payload } => {
                    assert_eq!(status, 500);
                    assert_eq!(payload, body);
                }
                other => panic!("Expected payload error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_classify_plain_text_keeps_body_verbatim() {
        let err = classify(418, Some("text/plain"), "  something bad happened\n").unwrap();
        assert_eq!(
            err,
            ResponseError::Response {
                status: 418,
                message: "  something bad happened\n".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_ignores_status_for_kind() {
        let body = r#"{"msg":"nope","code":"invalid_auth","request_id":"r-9"}"#;
        for status in [400, 401, 403, 404, 500, 503] {
            let err = classify(status, Some("application/json"), body).unwrap();
            assert_eq!(err.kind(), ErrorKind::Server);
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn test_classify_rejects_unknown_content_type() {
        let err = classify(500, Some("text/html"), "<h1>oops</h1>").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedContentType(ct) if ct == "text/html"));

        let err = classify(500, None, "").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedContentType(_)));
    }

    #[test]
    fn test_classify_invalid_json_body() {
        let err = classify(500, Some("application/json"), "{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_decode_success() {
        assert_eq!(decode_success(204, Some("application/json"), "").unwrap(), Payload::Empty);
        assert_eq!(decode_success(200, None, "ignored").unwrap(), Payload::Empty);
        assert_eq!(
            decode_success(200, Some("application/json"), r#"{"ok":true}"#).unwrap(),
            Payload::Json(json!({"ok": true}))
        );
        assert_eq!(
            decode_success(201, Some("text/plain"), "created").unwrap(),
            Payload::Text("created".to_string())
        );
        assert!(matches!(
            decode_success(200, Some("application/xml"), "<a/>"),
            Err(Error::UnrecognizedContentType(_))
        ));
    }
}
