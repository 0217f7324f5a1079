/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (upstream client, services) → Router 組み立て
 * - Middleware の適用 (gate は routes 側、CORS/security headers/http はここ)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, services::factory, state::AppState};

fn init_tracing() {
    // RUST_LOG=info,bff_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash immediately so it gets noticed
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // AUTH_API_URL / BLOG_API_URL が無ければここで起動失敗
    let config = Config::from_env().inspect_err(|err| {
        tracing::error!(error = %err, "fatal configuration error");
    })?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        addr = %config.addr,
        identity = %config.auth_api_url,
        content = %config.blog_api_url,
        timeout_ms = config.upstream_timeout.as_millis() as u64,
        "starting BFF gateway in {:?} mode",
        config.app_env
    );

    let state = factory::build_state(&config).context("failed to build upstream clients")?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
