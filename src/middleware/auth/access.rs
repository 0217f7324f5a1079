//! Authorization ヘッダ → AuthGate → 許可 / 401
//!
//! - ヘッダが無い・空: identity service を呼ばずに 401
//! - ヘッダがある: identity service の /users/validate に問い合わせ、2xx 以外は 401
//! - どちらの 401 も同じ body (呼び出し側からは区別できない)
//!
//! 許可後はリクエストに手を加えず handler に渡す。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthorizationDecision, DenyReason};
use crate::state::AppState;

/// 保護するルート群に gate を掛ける。
///
/// `route_layer` なので、マッチしたルートにだけ適用される (404/405 は gate を通らない)。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let decision = state.gate.authorize(req.headers()).await;

    match decision {
        AuthorizationDecision::Allowed => {}
        AuthorizationDecision::Denied(DenyReason::MissingCredential) => {
            tracing::debug!(path = %req.uri().path(), "request without credential denied");
        }
        AuthorizationDecision::Denied(DenyReason::RejectedCredential) => {
            tracing::info!(path = %req.uri().path(), "request with rejected credential denied");
        }
    }
    decision.into_result()?;

    Ok(next.run(req).await)
}
