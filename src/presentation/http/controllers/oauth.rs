// src/presentation/http/controllers/oauth.rs
use crate::application::commands::grants::{AuthorizeCommand, TokenCommand};
use crate::application::dto::TokenResponse;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{OAuthForm, OAuthQuery};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    pub response_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub code: Option<String>,
    pub refresh_token: Option<String>,
}

pub async fn authorize(
    Extension(state): Extension<HttpState>,
    OAuthQuery(params): OAuthQuery<AuthorizeParams>,
) -> HttpResult<impl IntoResponse> {
    let command = AuthorizeCommand {
        response_type: params.response_type,
        client_id: params.client_id,
        redirect_uri: params.redirect_uri,
        state: params.state,
    };

    let redirect = state.services.grant_commands.authorize(command).into_http()?;

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect.location)]))
}

pub async fn token(
    Extension(state): Extension<HttpState>,
    OAuthForm(form): OAuthForm<TokenForm>,
) -> HttpResult<impl IntoResponse> {
    let command = TokenCommand {
        grant_type: form.grant_type,
        client_id: form.client_id,
        redirect_uri: form.redirect_uri,
        code: form.code,
        refresh_token: form.refresh_token,
    };

    let tokens: TokenResponse = state
        .services
        .grant_commands
        .token(command)
        .await
        .into_http()?;

    // RFC 6749 section 5.1: token responses must not be cached.
    Ok((
        [
            (header::CACHE_CONTROL, "no-store"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(tokens),
    ))
}
