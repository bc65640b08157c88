// src/application/commands/grants/refresh.rs
use super::{GrantCommandService, service::RejectionMessages};
use crate::{
    application::{
        dto::TokenResponse,
        error::{ApplicationError, ApplicationResult},
    },
    domain::credential::Purpose,
};

impl GrantCommandService {
    /// Rotate: a valid refresh token buys a brand new access/refresh pair for
    /// the same subject. With the replay guard on, the presented refresh
    /// token is spent.
    pub(super) async fn exchange_refresh_token(
        &self,
        refresh_token: Option<&str>,
    ) -> ApplicationResult<TokenResponse> {
        let refresh_token = refresh_token
            .ok_or_else(|| ApplicationError::invalid_request("refresh_token is required"))?;

        let credential = self
            .redeem(
                refresh_token,
                Purpose::Refresh,
                RejectionMessages {
                    expired: "Refresh token expired",
                    invalid: "Invalid refresh token",
                },
            )
            .await?;

        self.issue_token_pair(&credential.subject)
    }
}
