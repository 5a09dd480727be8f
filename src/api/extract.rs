//! Request extractors that report rejections as JSON API errors

use crate::api::error::ApiError;
use crate::error::GameHuntError;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// `Query` whose parse failures become `invalid_request` errors
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| invalid_request(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// `Json` body whose parse failures become `invalid_request` errors
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| invalid_request(rejection.body_text()))?;

        Ok(Self(value))
    }
}

fn invalid_request(reason: String) -> ApiError {
    GameHuntError::InvalidRequest { reason }.into()
}
