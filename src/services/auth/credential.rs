use axum::http::{HeaderMap, HeaderValue, header};

/// Caller credential as sent in `Authorization` (`"<scheme> <token>"`).
///
/// Opaque to the gateway: never decoded here, only forwarded to the identity
/// service. The single local check is that it is not empty.
#[derive(Clone)]
pub struct Credential(HeaderValue);

impl Credential {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?;
        let blank = value
            .to_str()
            .map(|s| s.trim().is_empty())
            .unwrap_or(value.is_empty());
        if blank {
            return None;
        }

        let mut value = value.clone();
        value.set_sensitive(true);
        Some(Self(value))
    }

    pub fn header_value(&self) -> HeaderValue {
        self.0.clone()
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
