/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - tokens: identity service 向け TokenService, gate: AuthGate, posts: content service 向け PostService
 * - Clone 前提で持つ (内部は Arc)
 * - リクエスト間で共有する可変状態は持たない
 */
use std::sync::Arc;

use crate::services::{
    auth::{AuthGate, TokenService},
    posts::PostService,
};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub gate: Arc<AuthGate>,
    pub posts: Arc<PostService>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenService>, gate: Arc<AuthGate>, posts: Arc<PostService>) -> Self {
        Self {
            tokens,
            gate,
            posts,
        }
    }
}
