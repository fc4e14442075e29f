// src/common/extract.rs

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::common::error::AppError;

/// Pembungkus `Json` yang rejection-nya memakai bentuk error JSON kita,
/// supaya body rusak/field tak dikenal tidak memunculkan respons plaintext
/// bawaan axum.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::BodyRejection(rejection.body_text())),
        }
    }
}
