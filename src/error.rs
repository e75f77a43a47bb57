use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidFilterValue { key: &'static str, value: String },

    #[error("Malformed form body: {}", .0.body_text())]
    MalformedForm(#[from] FormRejection),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::UnknownFilter(_)
            | AppError::InvalidFilterValue { .. } => StatusCode::BAD_REQUEST,
            AppError::MalformedForm(rejection) => rejection.status(),
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "_code": "ERROR",
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}
