use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Credential;

/// Handler で `Authorization` ヘッダをそのまま受け取るための extractor
/// ヘッダが無い・空の場合は upstream を呼ぶ前に 401 を返す
pub struct RequiredCredential(pub Credential);

impl<S> FromRequestParts<S> for RequiredCredential
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Credential::from_headers(&parts.headers)
            .map(RequiredCredential)
            .ok_or(AppError::Unauthorized)
    }
}
