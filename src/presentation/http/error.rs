use crate::application::{ApplicationResult, error::ApplicationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// OAuth2 error response: `{ "error": ..., "error_description": ... }`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    error: &'static str,
    description: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let error = err.error_code();
        match err {
            ApplicationError::UnsupportedResponseType(msg)
            | ApplicationError::InvalidClient(msg)
            | ApplicationError::InvalidRequest(msg)
            | ApplicationError::InvalidGrant(msg)
            | ApplicationError::UnsupportedGrantType(msg) => {
                Self::new(StatusCode::BAD_REQUEST, error, msg)
            }
            ApplicationError::Domain(_) | ApplicationError::Infrastructure(_) => {
                tracing::error!(error = %err, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error,
                    "Internal server error".into(),
                )
            }
        }
    }

    fn new(status: StatusCode, error: &'static str, description: String) -> Self {
        Self {
            status,
            error,
            description,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self.error,
            error_description: self.description,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    error_description: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
