/*
 * Responsibility
 * - /posts 系 CRUD handler (content service への pass-through)
 * - 認可は routes の route_layer (AuthGate) で済んでいる前提
 * - content service の payload は加工せずに返す (delete だけ固定メッセージ)
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Response,
};

use crate::{
    api::{
        dto::posts::{CreatePostRequest, UpdatePostRequest},
        extractors::{PostId, ValidJson},
    },
    error::{AppError, relay},
    services::posts::Deleted,
    state::AppState,
};

pub async fn create_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreatePostRequest>,
) -> Result<Response, AppError> {
    let payload = state.posts.create(&req.into()).await?;
    Ok(relay(StatusCode::CREATED, payload))
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Response, AppError> {
    let payload = state.posts.list().await?;
    Ok(relay(StatusCode::OK, payload))
}

pub async fn get_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Response, AppError> {
    let payload = state.posts.get(id).await?;
    Ok(relay(StatusCode::OK, payload))
}

pub async fn update_post(
    State(state): State<AppState>,
    PostId(id): PostId,
    ValidJson(req): ValidJson<UpdatePostRequest>,
) -> Result<Response, AppError> {
    let payload = state.posts.update(id, &req.into()).await?;
    Ok(relay(StatusCode::OK, payload))
}

pub async fn delete_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<Deleted>, AppError> {
    let deleted = state.posts.delete(id).await?;
    Ok(Json(deleted))
}
