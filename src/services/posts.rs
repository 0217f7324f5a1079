//! Posts pass-through to the content service.
//!
//! One upstream call per operation. Upstream payloads are relayed untouched;
//! a 404 on an id-addressed call becomes `AppError::NotFound`.
use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::services::upstream::{Payload, UpstreamClient, UpstreamFailure, UpstreamRequest};

const RESOURCE: &str = "post";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub message: String,
}

#[derive(Clone)]
pub struct PostService {
    content: Arc<dyn UpstreamClient>,
}

impl PostService {
    pub fn new(content: Arc<dyn UpstreamClient>) -> Self {
        Self { content }
    }

    pub async fn create(&self, post: &NewPost) -> Result<Payload, AppError> {
        let req = UpstreamRequest::post("/posts").json(encode(post)?);
        Ok(self.content.call(req).await?)
    }

    pub async fn list(&self) -> Result<Payload, AppError> {
        Ok(self.content.call(UpstreamRequest::get("/posts")).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Payload, AppError> {
        self.content
            .call(UpstreamRequest::get(item_path(id)))
            .await
            .map_err(|f| not_found_or_translate(f, id))
    }

    pub async fn update(&self, id: i64, patch: &PostPatch) -> Result<Payload, AppError> {
        let req = UpstreamRequest::patch(item_path(id)).json(encode(patch)?);
        self.content
            .call(req)
            .await
            .map_err(|f| not_found_or_translate(f, id))
    }

    /// The upstream body is discarded; callers always get the same message shape.
    pub async fn delete(&self, id: i64) -> Result<Deleted, AppError> {
        self.content
            .call(UpstreamRequest::delete(item_path(id)))
            .await
            .map_err(|f| not_found_or_translate(f, id))?;

        Ok(Deleted {
            message: format!("Post with ID {id} was successfully deleted."),
        })
    }
}

fn item_path(id: i64) -> String {
    format!("/posts/{id}")
}

fn encode<T: Serialize>(body: &T) -> Result<Value, AppError> {
    serde_json::to_value(body).map_err(|e| {
        tracing::error!(error = %e, "failed to encode post body");
        AppError::Internal
    })
}

fn not_found_or_translate(failure: UpstreamFailure, id: i64) -> AppError {
    if failure.status() == Some(StatusCode::NOT_FOUND) {
        AppError::not_found(RESOURCE, id)
    } else {
        failure.into()
    }
}
