// src/application/commands/grants/token.rs
use super::GrantCommandService;
use crate::application::{
    dto::TokenResponse,
    error::{ApplicationError, ApplicationResult},
};
use tracing::warn;

pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

pub struct TokenCommand {
    pub grant_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub code: Option<String>,
    pub refresh_token: Option<String>,
}

impl GrantCommandService {
    /// Token endpoint. Client and redirect checks apply before grant dispatch.
    pub async fn token(&self, command: TokenCommand) -> ApplicationResult<TokenResponse> {
        self.ensure_client(command.client_id.as_deref())?;
        self.ensure_redirect_uri(command.redirect_uri.as_deref())?;

        match command.grant_type.as_deref() {
            Some(GRANT_TYPE_AUTHORIZATION_CODE) => {
                self.exchange_authorization_code(non_empty(command.code.as_deref()))
                    .await
            }
            Some(GRANT_TYPE_REFRESH_TOKEN) => {
                self.exchange_refresh_token(non_empty(command.refresh_token.as_deref()))
                    .await
            }
            other => {
                warn!(grant_type = ?other, "rejected grant_type");
                Err(ApplicationError::unsupported_grant_type(
                    "Grant type is not supported",
                ))
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
