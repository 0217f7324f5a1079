use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// 形式チェック。DTO ごとに実装する
pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}

/// JSON body を deserialize → validate まで済ませた値
/// 壊れた JSON、未知のフィールド、形式違反はすべて 400 (VALIDATION_ERROR)
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate().map_err(AppError::validation)?;

        Ok(Self(value))
    }
}
