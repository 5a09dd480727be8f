//! Mapping of service errors onto HTTP responses

use crate::error::GameHuntError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<GameHuntError>() {
            Some(GameHuntError::GameNotFound { .. }) => StatusCode::NOT_FOUND,
            Some(GameHuntError::InvalidGame { .. })
            | Some(GameHuntError::InvalidRequest { .. })
            | Some(GameHuntError::InvalidWeights { .. }) => StatusCode::BAD_REQUEST,
            Some(GameHuntError::CatalogFull { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        self.0
            .downcast_ref::<GameHuntError>()
            .map_or("internal_error", GameHuntError::code)
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let body = json!({
            "error": self.0.to_string(),
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}
