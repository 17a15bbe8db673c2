//! Path extractor that reports malformed segments as JSON errors.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Drop-in for `Path<T>`: a segment that does not parse (a non-UUID id)
/// becomes a 400 `AppError` instead of axum's plain-text rejection.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected path parameters");
                AppError::BadRequest("Invalid ID format".to_string())
            })?;

        Ok(ValidatedPath(value))
    }
}
