/*
 * Responsibility
 * - URL 構造を定義 (/health, /auth, /posts)
 * - 認可 (AuthGate) が必要な範囲はここで route_layer として明示する
 *   - /posts 以下のみ。/auth 以下は gate を通さない (logout は extractor でヘッダ必須)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{login, logout, refresh, signup},
    health::health,
    posts::{create_post, delete_post, get_post, list_posts, update_post},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh));

    let protected = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        );
    let protected = access::apply(protected, state);

    public.merge(protected)
}
