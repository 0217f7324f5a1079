/*
 * Responsibility
 * - /auth 系 handler (login / signup / logout / refresh)
 * - 検証済み DTO を TokenService に渡し、結果を 201 で返すだけ
 * - upstream のエラーは AppError 経由でそのまま中継される
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::auth::{LoginRequest, RefreshRequest, SignupRequest},
        extractors::{RequiredCredential, ValidJson},
    },
    error::AppError,
    services::auth::TokenPair,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<(StatusCode, Json<TokenPair>), AppError> {
    let pair = state.tokens.login(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(pair)))
}

pub async fn signup(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> Result<(StatusCode, String), AppError> {
    let confirmation = state.tokens.signup(&req.into_registration()).await?;
    Ok((StatusCode::CREATED, confirmation))
}

// Authorization ヘッダが無ければ extractor が 401 を返すので upstream は呼ばれない
pub async fn logout(
    State(state): State<AppState>,
    RequiredCredential(credential): RequiredCredential,
) -> Result<(StatusCode, String), AppError> {
    let confirmation = state.tokens.logout(&credential).await?;
    Ok((StatusCode::CREATED, confirmation))
}

pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RefreshRequest>,
) -> Result<(StatusCode, Json<TokenPair>), AppError> {
    let pair = state.tokens.refresh(&req.refresh_token).await?;
    Ok((StatusCode::CREATED, Json(pair)))
}
