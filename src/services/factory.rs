/// Factory: build the upstream-backed services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthGate, TokenService};
use crate::services::posts::PostService;
use crate::services::upstream::{HttpUpstream, UpstreamClient};
use crate::state::AppState;

pub fn build_state(config: &Config) -> Result<AppState, reqwest::Error> {
    let identity: Arc<dyn UpstreamClient> = Arc::new(HttpUpstream::new(
        "identity",
        &config.auth_api_url,
        config.upstream_timeout,
    )?);
    let content: Arc<dyn UpstreamClient> = Arc::new(HttpUpstream::new(
        "content",
        &config.blog_api_url,
        config.upstream_timeout,
    )?);

    Ok(state_from_upstreams(identity, content))
}

pub fn state_from_upstreams(
    identity: Arc<dyn UpstreamClient>,
    content: Arc<dyn UpstreamClient>,
) -> AppState {
    let tokens = Arc::new(TokenService::new(identity));
    let gate = Arc::new(AuthGate::new(tokens.clone()));
    let posts = Arc::new(PostService::new(content));

    AppState::new(tokens, gate, posts)
}
