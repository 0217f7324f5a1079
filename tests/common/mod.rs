//! Shared helpers: stub identity/content services and a gateway wired to them,
//! each bound to an ephemeral port.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use bff_gateway::{app, config::Config, services::factory};

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Counts every request a stub receives.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Hits>, req: axum::extract::Request, next: Next) -> Response {
    hits.0.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
}

// --- identity service stub ---
//
// valid credential: "Bearer AT1"; valid password: "secret123"; taken email: "taken@b.com"

async fn stub_login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret123" {
        (
            StatusCode::CREATED,
            Json(json!({"accessToken": "AT1", "refreshToken": "RT1", "accessTokenExpiresIn": 3600})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": 401, "message": "invalid email or password"})),
        )
            .into_response()
    }
}

async fn stub_signup(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@b.com" {
        (
            StatusCode::CONFLICT,
            Json(json!({"status": 409, "message": "email already exists"})),
        )
            .into_response()
    } else {
        (StatusCode::CREATED, "signup completed").into_response()
    }
}

async fn stub_logout(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some("Bearer AT1") => (StatusCode::OK, "logout completed").into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn stub_refresh(Json(body): Json<Value>) -> Response {
    if body["refreshToken"] == "RT1" {
        (
            StatusCode::CREATED,
            Json(json!({"grantType": "Bearer", "accessToken": "AT2", "refreshToken": "RT2"})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid refresh token"})),
        )
            .into_response()
    }
}

async fn stub_validate(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some("Bearer AT1") => StatusCode::OK.into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "token expired"})),
        )
            .into_response(),
    }
}

pub async fn spawn_identity() -> (TestServer, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route("/users/login", post(stub_login))
        .route("/users/signup", post(stub_signup))
        .route("/users/logout", post(stub_logout))
        .route("/users/refresh", post(stub_refresh))
        .route("/users/validate", get(stub_validate))
        .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

    (TestServer::spawn(router).await, hits)
}

/// Identity stub whose validate endpoint answers only after `delay`.
pub async fn spawn_slow_identity(delay: std::time::Duration) -> (TestServer, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/users/validate",
            get(move || async move {
                tokio::time::sleep(delay).await;
                StatusCode::OK
            }),
        )
        .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

    (TestServer::spawn(router).await, hits)
}

// --- content service stub ---
//
// post 1 exists; post 42 can be deleted; everything else is 404.

fn post_one() -> Value {
    json!({"id": 1, "title": "hello", "content": "first post", "authorId": 7, "views": 0})
}

fn missing() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "post not found"})),
    )
        .into_response()
}

async fn stub_list() -> Json<Value> {
    Json(json!([post_one()]))
}

async fn stub_create(Json(mut body): Json<Value>) -> Response {
    body["id"] = json!(10);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn stub_get(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(post_one()).into_response()
    } else {
        missing()
    }
}

async fn stub_update(Path(id): Path<i64>, Json(patch): Json<Value>) -> Response {
    if id != 1 {
        return missing();
    }
    let mut post = post_one();
    for (k, v) in patch.as_object().cloned().unwrap_or_default() {
        post[k.as_str()] = v;
    }
    Json(post).into_response()
}

async fn stub_delete(Path(id): Path<i64>) -> Response {
    if id == 42 {
        Json(json!({"deleted": true, "unexpected": ["shape"]})).into_response()
    } else {
        missing()
    }
}

pub async fn spawn_content() -> (TestServer, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route("/posts", get(stub_list).post(stub_create))
        .route(
            "/posts/{id}",
            get(stub_get).patch(stub_update).delete(stub_delete),
        )
        .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

    (TestServer::spawn(router).await, hits)
}

/// An address nothing listens on (bind, then drop the listener).
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// --- gateway ---

pub async fn spawn_gateway(auth_api_url: &str, blog_api_url: &str) -> TestServer {
    spawn_gateway_with_timeout(auth_api_url, blog_api_url, 2000).await
}

pub async fn spawn_gateway_with_timeout(
    auth_api_url: &str,
    blog_api_url: &str,
    upstream_timeout_ms: u64,
) -> TestServer {
    let auth_api_url = auth_api_url.to_string();
    let blog_api_url = blog_api_url.to_string();
    let config = Config::from_lookup(|key| match key {
        "AUTH_API_URL" => Some(auth_api_url.clone()),
        "BLOG_API_URL" => Some(blog_api_url.clone()),
        "UPSTREAM_TIMEOUT_MS" => Some(upstream_timeout_ms.to_string()),
        _ => None,
    })
    .expect("test config");

    let state = factory::build_state(&config).expect("upstream clients");
    TestServer::spawn(app::build_router(state, &config)).await
}

pub struct Env {
    pub gateway: TestServer,
    pub identity: TestServer,
    pub identity_hits: Hits,
    pub content: TestServer,
    pub content_hits: Hits,
    pub client: reqwest::Client,
}

impl Env {
    pub async fn start() -> Self {
        let (identity, identity_hits) = spawn_identity().await;
        let (content, content_hits) = spawn_content().await;
        let gateway = spawn_gateway(&identity.base_url, &content.base_url).await;

        Self {
            gateway,
            identity,
            identity_hits,
            content,
            content_hits,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway.base_url, path)
    }
}
