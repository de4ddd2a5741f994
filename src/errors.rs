use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::{RenderError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(e) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind()
            })),
            AppError::Render(_) => HttpResponse::InternalServerError()
                .json(serde_json::json!({
                    "error": "Internal server error"
                })),
        }
    }
}
