// src/presentation/http/extractors.rs
use crate::application::error::ApplicationError;
use axum::{
    Form,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::HttpError;

const MALFORMED_REQUEST: &str = "Malformed request";

/// Query string extractor that rejects with an OAuth error body.
#[derive(Debug, Clone)]
pub struct OAuthQuery<T>(pub T);

/// `application/x-www-form-urlencoded` body extractor that rejects with an
/// OAuth error body.
#[derive(Debug, Clone)]
pub struct OAuthForm<T>(pub T);

fn malformed(detail: &dyn std::fmt::Display) -> HttpError {
    tracing::debug!(error = %detail, "rejected malformed request");
    HttpError::from_error(ApplicationError::invalid_request(MALFORMED_REQUEST))
}

impl<T, S> FromRequestParts<S> for OAuthQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| malformed(&rejection))?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequest<S> for OAuthForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| malformed(&rejection))?;
        Ok(Self(value))
    }
}
