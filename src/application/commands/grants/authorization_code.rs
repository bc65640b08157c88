// src/application/commands/grants/authorization_code.rs
use super::{GrantCommandService, service::RejectionMessages};
use crate::{
    application::{
        dto::TokenResponse,
        error::{ApplicationError, ApplicationResult},
    },
    domain::credential::Purpose,
};

impl GrantCommandService {
    pub(super) async fn exchange_authorization_code(
        &self,
        code: Option<&str>,
    ) -> ApplicationResult<TokenResponse> {
        let code = code.ok_or_else(|| ApplicationError::invalid_request("code is required"))?;

        let credential = self
            .redeem(
                code,
                Purpose::Code,
                RejectionMessages {
                    expired: "Authorization code expired",
                    invalid: "Invalid authorization code",
                },
            )
            .await?;

        self.issue_token_pair(&credential.subject)
    }
}
