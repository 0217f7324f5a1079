use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::services::auth::credential::Credential;
use crate::services::upstream::{Payload, UpstreamClient, UpstreamFailure, UpstreamRequest};

const LOGIN_PATH: &str = "/users/login";
const SIGNUP_PATH: &str = "/users/signup";
const LOGOUT_PATH: &str = "/users/logout";
const REFRESH_PATH: &str = "/users/refresh";
const VALIDATE_PATH: &str = "/users/validate";

/// Token pair issued by the identity service.
///
/// Holds the identity service's JSON object exactly as received, extra fields
/// included, and serializes back to it. Construction checks that both tokens
/// are strings. The gateway never stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenPair(Value);

// only deserialized to check the shape
#[allow(dead_code)]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPairShape {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    grant_type: Option<String>,
}

impl TokenPair {
    fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        TokenPairShape::deserialize(&value)?;
        Ok(Self(value))
    }

    pub fn access_token(&self) -> &str {
        self.field("accessToken").unwrap_or_default()
    }

    pub fn refresh_token(&self) -> &str {
        self.field("refreshToken").unwrap_or_default()
    }

    pub fn grant_type(&self) -> Option<&str> {
        self.field("grantType")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Already-validated registration fields, in the identity service's wire shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub nick_name: String,
    pub birth: NaiveDate,
}

/// Token lifecycle against the identity service.
///
/// Stateless: each operation is exactly one upstream call. Failures are
/// relayed through the error translator, except `validate` which folds every
/// failure into `false`.
#[derive(Clone)]
pub struct TokenService {
    identity: Arc<dyn UpstreamClient>,
}

impl TokenService {
    pub fn new(identity: Arc<dyn UpstreamClient>) -> Self {
        Self { identity }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let payload = self
            .identity
            .call(
                UpstreamRequest::post(LOGIN_PATH)
                    .json(json!({ "email": email, "password": password })),
            )
            .await?;

        token_pair(payload, LOGIN_PATH)
    }

    pub async fn signup(&self, registration: &Registration) -> Result<String, AppError> {
        let body = serde_json::to_value(registration).map_err(|e| {
            tracing::error!(error = %e, "failed to encode signup body");
            AppError::Internal
        })?;

        let payload = self
            .identity
            .call(UpstreamRequest::post(SIGNUP_PATH).json(body))
            .await?;

        Ok(payload.into_text())
    }

    pub async fn logout(&self, credential: &Credential) -> Result<String, AppError> {
        let payload = self
            .identity
            .call(
                UpstreamRequest::post(LOGOUT_PATH)
                    .json(json!({}))
                    .authorization(credential.header_value()),
            )
            .await?;

        Ok(payload.into_text())
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let payload = self
            .identity
            .call(
                UpstreamRequest::post(REFRESH_PATH)
                    .json(json!({ "refreshToken": refresh_token })),
            )
            .await?;

        token_pair(payload, REFRESH_PATH)
    }

    /// `true` iff the identity service answers 2xx for this credential.
    ///
    /// Fail-closed: a rejection and an unreachable identity service both give
    /// `false`. They are logged at different levels so operators can tell an
    /// outage apart from bad tokens.
    pub async fn validate(&self, credential: &Credential) -> bool {
        let result = self
            .identity
            .call(UpstreamRequest::get(VALIDATE_PATH).authorization(credential.header_value()))
            .await;

        match result {
            Ok(_) => true,
            Err(UpstreamFailure::Response { status, .. }) => {
                tracing::warn!(
                    upstream = self.identity.service_name(),
                    status = status.as_u16(),
                    "token rejected by identity service"
                );
                false
            }
            Err(UpstreamFailure::Transport { reason }) => {
                tracing::error!(
                    upstream = self.identity.service_name(),
                    reason = %reason,
                    "identity service unreachable during token validation; denying"
                );
                false
            }
        }
    }
}

// A 2xx without a token pair in it is a broken upstream, not the caller's fault.
fn token_pair(payload: Payload, path: &'static str) -> Result<TokenPair, AppError> {
    match payload {
        Payload::Json(value) => TokenPair::from_json(value).map_err(|e| {
            tracing::error!(path, error = %e, "malformed token pair from identity service");
            AppError::Internal
        }),
        _ => {
            tracing::error!(path, "identity service returned a non-JSON token response");
            Err(AppError::Internal)
        }
    }
}
