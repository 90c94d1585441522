//! Request body extractor that reports rejections in the error envelope.

use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::Json;

use crate::error::AppError;

/// `Json<T>` whose rejections (bad syntax, wrong content type, wrong field
/// types) become [`AppError::BadRequest`] instead of axum's plain-text body.
///
/// `Option<AppJson<T>>` accepts a request with no body at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    Json<T>: OptionalFromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let value = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(value.map(|Json(inner)| Self(inner)))
    }
}
