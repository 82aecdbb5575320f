//! JSON envelope codec: one JSON document in, one JSON document (or nothing) out.
//!
//! Every response body is either empty, the JSON encoding of the payload, or
//! the error envelope `{"msg": "<text>"}`.

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on a request body, in bytes (1 MiB).
pub const MAX_BODY_BYTES: usize = 1 << 20;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("request body too large")]
    TooLarge,

    #[error("failed to read request body: {0}")]
    Read(axum::Error),

    #[error("{0}")]
    Decode(serde_json::Error),

    #[error("only one json body allowed")]
    MultipleBodies,

    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),

    #[error("failed to write response: {0}")]
    Write(axum::http::Error),
}

/// Wire shape of every error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub msg: String,
}

/// What a handler wants written back.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success { status: StatusCode, data: Option<T> },
    Failure { status: StatusCode, message: String },
}

impl<T> Reply<T> {
    /// `200 OK` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::Success {
            status: StatusCode::OK,
            data: Some(data),
        }
    }

    /// Status only, zero-byte body.
    pub fn empty(status: StatusCode) -> Self {
        Self::Success { status, data: None }
    }

    /// Any displayable error becomes the `msg` envelope.
    pub fn failure(status: StatusCode, err: impl core::fmt::Display) -> Self {
        Self::Failure {
            status,
            message: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }
}

/// Read the whole request body (bounded by [`MAX_BODY_BYTES`]) and decode it.
pub async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, CodecError> {
    let bytes = read_body(body).await?;
    decode(&bytes)
}

async fn read_body(body: Body) -> Result<Bytes, CodecError> {
    axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            let inner = e.into_inner();
            if inner.is::<http_body_util::LengthLimitError>() {
                CodecError::TooLarge
            } else {
                CodecError::Read(axum::Error::new(inner))
            }
        })
}

/// Decode exactly one JSON value; only whitespace may follow it.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(CodecError::Decode)?;
    de.end().map_err(|_| CodecError::MultipleBodies)?;
    Ok(value)
}

/// Serialize a reply into a response.
///
/// `Content-Type: application/json` is set first; `overrides` then replace
/// whole header entries (all values for each named header).
pub fn encode<T: Serialize>(
    reply: Reply<T>,
    overrides: Option<&HeaderMap>,
) -> Result<Response, CodecError> {
    let (status, payload) = match reply {
        Reply::Success { status, data: None } => (status, Vec::new()),
        Reply::Success {
            status,
            data: Some(data),
        } => (status, serde_json::to_vec(&data).map_err(CodecError::Encode)?),
        Reply::Failure { status, message } => {
            let envelope = ErrorEnvelope { msg: message };
            (status, serde_json::to_vec(&envelope).map_err(CodecError::Encode)?)
        }
    };

    let mut response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(Body::from(payload))
        .map_err(CodecError::Write)?;

    if let Some(overrides) = overrides {
        let headers = response.headers_mut();
        for name in overrides.keys() {
            headers.remove(name);
            for value in overrides.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }

    Ok(response)
}

/// Encode a reply; an encoding failure is logged and answered with a bare 500.
pub fn respond<T: Serialize>(reply: Reply<T>, overrides: Option<&HeaderMap>) -> Response {
    let status = reply.status();
    match encode(reply, overrides) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "failed to write response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedsvc_core::Federation;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value cannot be represented as json"))
        }
    }

    #[test]
    fn decode_single_value() {
        let fed: Federation = decode(br#"{"id":1,"owner":"owner"}"#).unwrap();
        assert_eq!(fed, Federation::new(1, "owner"));
    }

    #[test]
    fn decode_allows_trailing_whitespace() {
        let fed: Federation = decode(b"{\"id\":1,\"owner\":\"o\"}\n  \t").unwrap();
        assert_eq!(fed.owner, "o");
    }

    #[test]
    fn decode_rejects_second_document() {
        let err = decode::<Federation>(br#"{"id":1,"owner":"o"}{}"#).unwrap_err();
        assert!(matches!(err, CodecError::MultipleBodies));
        assert_eq!(err.to_string(), "only one json body allowed");
    }

    #[test]
    fn decode_rejects_trailing_garbage() {
        let err = decode::<Federation>(br#"{"id":1,"owner":"o"} x"#).unwrap_err();
        assert!(matches!(err, CodecError::MultipleBodies));
    }

    #[test]
    fn decode_reports_syntax_errors() {
        let err = decode::<Federation>(br#"{"id":1,"owner":"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));

        let err = decode::<Federation>(b"").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn decode_reports_type_errors() {
        let err = decode::<Federation>(br#"{"id":"one","owner":"o"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
        assert!(err.to_string().contains("invalid type"));
    }

    #[tokio::test]
    async fn read_json_rejects_oversized_body() {
        let owner = "a".repeat(MAX_BODY_BYTES);
        let body = format!(r#"{{"id":1,"owner":"{owner}"}}"#);
        let err = read_json::<Federation>(Body::from(body)).await.unwrap_err();
        assert!(matches!(err, CodecError::TooLarge));
    }

    #[tokio::test]
    async fn read_json_accepts_body_at_limit() {
        let prefix = r#"{"id":1,"owner":""#;
        let suffix = r#""}"#;
        let owner = "a".repeat(MAX_BODY_BYTES - prefix.len() - suffix.len());
        let body = format!("{prefix}{owner}{suffix}");
        assert_eq!(body.len(), MAX_BODY_BYTES);

        let fed = read_json::<Federation>(Body::from(body)).await.unwrap();
        assert_eq!(fed.owner.len(), owner.len());
    }

    #[tokio::test]
    async fn encode_empty_reply_has_no_body() {
        let resp = encode(Reply::<()>::empty(StatusCode::CREATED), None).unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn encode_failure_uses_msg_envelope() {
        let err = fedsvc_core::RepositoryError::NotFound(fedsvc_core::FederationId::new(7));
        let resp = encode(Reply::<()>::failure(StatusCode::NOT_FOUND, err), None).unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(&body_bytes(resp).await[..], br#"{"msg":"federation 7 not found"}"#);
    }

    #[tokio::test]
    async fn encode_data_as_json() {
        let resp = encode(Reply::ok(vec![Federation::new(1, "a")]), None).unwrap();
        assert_eq!(&body_bytes(resp).await[..], br#"[{"id":1,"owner":"a"}]"#);

        let resp = encode(Reply::ok(Vec::<Federation>::new()), None).unwrap();
        assert_eq!(&body_bytes(resp).await[..], b"[]");
    }

    #[test]
    fn header_overrides_replace_content_type() {
        let mut overrides = HeaderMap::new();
        overrides.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        overrides.append("x-extra", HeaderValue::from_static("a"));
        overrides.append("x-extra", HeaderValue::from_static("b"));

        let resp = encode(Reply::ok(1), Some(&overrides)).unwrap();
        assert_eq!(resp.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(resp.headers().get_all("x-extra").iter().count(), 2);
    }

    #[test]
    fn encode_error_is_returned_not_panicked() {
        let err = encode(Reply::ok(Unserializable), None).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
    }

    #[test]
    fn respond_turns_encode_error_into_bare_500() {
        let resp = respond(Reply::ok(Unserializable), None);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
