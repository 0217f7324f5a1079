use std::sync::Arc;

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::services::auth::credential::Credential;
use crate::services::auth::token_service::TokenService;

/// Why a request was denied. Operator-facing only: callers see the same
/// `Unauthorized` for every reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingCredential,
    RejectedCredential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allowed,
    Denied(DenyReason),
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied(_) => Err(AppError::Unauthorized),
        }
    }
}

/// Gate in front of protected routes.
///
/// No credential short-circuits to denied without any upstream call; otherwise
/// the identity service decides through `TokenService::validate`.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub async fn authorize(&self, headers: &HeaderMap) -> AuthorizationDecision {
        let Some(credential) = Credential::from_headers(headers) else {
            return AuthorizationDecision::Denied(DenyReason::MissingCredential);
        };

        if self.tokens.validate(&credential).await {
            AuthorizationDecision::Allowed
        } else {
            AuthorizationDecision::Denied(DenyReason::RejectedCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode, header};

    use super::*;
    use crate::services::auth::token_service::tests::FakeUpstream;
    use crate::services::upstream::{Payload, UpstreamFailure};

    fn bearer(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    fn gate(identity: Arc<FakeUpstream>) -> AuthGate {
        AuthGate::new(Arc::new(TokenService::new(identity)))
    }

    #[tokio::test]
    async fn missing_credential_never_reaches_identity() {
        let identity = FakeUpstream::replying(vec![Ok(Payload::Empty)]);
        let gate = gate(identity.clone());

        let decision = gate.authorize(&HeaderMap::new()).await;

        assert_eq!(
            decision,
            AuthorizationDecision::Denied(DenyReason::MissingCredential)
        );
        assert_eq!(identity.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_credential_is_treated_as_missing() {
        let identity = FakeUpstream::replying(vec![]);
        let gate = gate(identity.clone());

        let decision = gate.authorize(&bearer(" ")).await;

        assert!(!decision.is_allowed());
        assert_eq!(identity.call_count(), 0);
    }

    #[tokio::test]
    async fn valid_credential_is_allowed() {
        let identity = FakeUpstream::replying(vec![Ok(Payload::Empty)]);
        let gate = gate(identity.clone());

        let decision = gate.authorize(&bearer("Bearer AT1")).await;

        assert_eq!(decision, AuthorizationDecision::Allowed);
        assert_eq!(decision.into_result(), Ok(()));
        assert_eq!(identity.call_count(), 1);
    }

    #[tokio::test]
    async fn rejection_and_outage_are_indistinguishable() {
        let identity = FakeUpstream::replying(vec![
            Err(UpstreamFailure::Response {
                status: StatusCode::UNAUTHORIZED,
                body: Payload::Empty,
            }),
            Err(UpstreamFailure::transport("connection refused")),
        ]);
        let gate = gate(identity);

        let rejected = gate.authorize(&bearer("Bearer expired")).await;
        let outage = gate.authorize(&bearer("Bearer AT1")).await;

        assert_eq!(rejected, outage);
        assert_eq!(rejected.into_result(), Err(AppError::Unauthorized));
        assert_eq!(outage.into_result(), Err(AppError::Unauthorized));
    }
}
