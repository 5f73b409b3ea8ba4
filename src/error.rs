use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::num;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("parse int error: {0}")]
    ParseIntError(#[from] num::ParseIntError),

    #[error("bussiness error: {0}")]
    BusinessError(String),

    #[error("third-party poll provider temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("error from third-party poll provider: {0}")]
    RequestRejected(String),

    #[error("invalid response from third-party poll provider: {0}")]
    InvalidResponse(String),

    #[error("answer already has slot {0}")]
    SlotAlreadyAssigned(String),
}

impl Error {
    pub fn from_provider_status(status: u16, detail: String) -> Option<Self> {
        match status {
            s if s >= 500 => Some(Error::ServiceUnavailable(detail)),
            s if s >= 400 => Some(Error::RequestRejected(detail)),
            _ => None,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Error::ServiceUnavailable(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Error::InvalidResponse(e.to_string());
        }
        Error::ServiceUnavailable(e.to_string())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Error::BusinessError(_) | Error::ParseIntError(_) | Error::RequestRejected(_) => StatusCode::BAD_REQUEST,
            Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}
