//! Upstream client interface used by the token service and the posts proxy.
use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use serde_json::Value;
use thiserror::Error;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamFailure>;

/// Opaque upstream body.
///
/// Its shape belongs to the upstream service, so it is kept as JSON / text
/// instead of a typed structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Empty,
}

impl Payload {
    /// Decode a raw response body: JSON when it parses, otherwise UTF-8 text.
    pub fn decode(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Render the payload as a plain string (used for confirmation messages).
    ///
    /// A JSON string is unwrapped; any other JSON is re-serialized.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(Value::String(s)) => s,
            Self::Json(other) => other.to_string(),
            Self::Text(s) => s,
            Self::Empty => String::new(),
        }
    }
}

/// Upstream-layer failure.
///
/// Not an `AppError`: callers decide what a failure means for them
/// (relay for most operations, `false` for token validation).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpstreamFailure {
    /// The upstream answered, but not with 2xx.
    #[error("upstream responded with {status}")]
    Response { status: StatusCode, body: Payload },
    /// No usable response: connection refused, timeout, broken body, etc.
    #[error("upstream transport error: {reason}")]
    Transport { reason: String },
}

impl UpstreamFailure {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// One outbound call: verb, path (relative to the client's base URL),
/// optional JSON body, extra headers.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Forward a caller credential as-is in `Authorization`.
    pub fn authorization(mut self, value: HeaderValue) -> Self {
        self.headers.insert(header::AUTHORIZATION, value);
        self
    }
}

/// A configured upstream service.
///
/// Implementations perform exactly one outbound call per `call` and never
/// retry. Every failure comes back as `UpstreamFailure`.
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
    // Upstream name (for logging).
    fn service_name(&self) -> &'static str;

    async fn call(&self, request: UpstreamRequest) -> UpstreamResult<Payload>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_prefers_json() {
        assert_eq!(
            Payload::decode(br#"{"accessToken":"AT1"}"#),
            Payload::Json(json!({"accessToken": "AT1"}))
        );
    }

    #[test]
    fn decode_falls_back_to_text() {
        assert_eq!(
            Payload::decode(b"signup complete"),
            Payload::Text("signup complete".to_string())
        );
    }

    #[test]
    fn decode_blank_body_is_empty() {
        assert_eq!(Payload::decode(b""), Payload::Empty);
        assert_eq!(Payload::decode(b" \n"), Payload::Empty);
    }

    #[test]
    fn into_text_unwraps_json_strings() {
        assert_eq!(Payload::Json(json!("logged out")).into_text(), "logged out");
        assert_eq!(Payload::Json(json!({"ok": true})).into_text(), r#"{"ok":true}"#);
        assert_eq!(Payload::Empty.into_text(), "");
    }

    #[test]
    fn authorization_is_forwarded_verbatim() {
        let req = UpstreamRequest::get("/users/validate")
            .authorization(HeaderValue::from_static("Bearer abc"));
        assert_eq!(req.headers[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
    }
}
