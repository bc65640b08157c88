// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Protocol-level failures. Every variant except `Domain` and
/// `Infrastructure` corresponds to one wire `error` code.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unsupported response type: {0}")]
    UnsupportedResponseType(String),

    #[error("invalid client: {0}")]
    InvalidClient(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid grant: {0}")]
    InvalidGrant(String),

    #[error("unsupported grant type: {0}")]
    UnsupportedGrantType(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn unsupported_response_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedResponseType(msg.into())
    }

    pub fn invalid_client(msg: impl Into<String>) -> Self {
        Self::InvalidClient(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_grant(msg: impl Into<String>) -> Self {
        Self::InvalidGrant(msg.into())
    }

    pub fn unsupported_grant_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedGrantType(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// The OAuth2 `error` code for this failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedResponseType(_) => "unsupported_response_type",
            Self::InvalidClient(_) => "invalid_client",
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidGrant(_) => "invalid_grant",
            Self::UnsupportedGrantType(_) => "unsupported_grant_type",
            Self::Domain(_) | Self::Infrastructure(_) => "server_error",
        }
    }
}
