// src/application/commands/grants/service.rs
use crate::{
    application::{
        dto::TokenResponse,
        error::{ApplicationError, ApplicationResult},
        ports::{credential::CredentialCodec, replay::ConsumedCredentialStore},
    },
    domain::credential::{CredentialRejection, Purpose, Subject, VerifiedCredential},
};
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

/// The single registered client and the per-purpose credential lifetimes.
#[derive(Debug, Clone)]
pub struct GrantSettings {
    pub client_id: String,
    pub redirect_uri: String,
    pub auth_code_ttl: Duration,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

/// Error descriptions for one redeemable credential kind.
pub(super) struct RejectionMessages {
    pub expired: &'static str,
    pub invalid: &'static str,
}

pub struct GrantCommandService {
    pub(super) settings: GrantSettings,
    pub(super) codec: Arc<dyn CredentialCodec>,
    replay_guard: Option<Arc<dyn ConsumedCredentialStore>>,
}

impl GrantCommandService {
    /// Without a replay guard, codes and refresh tokens stay redeemable until
    /// they expire.
    pub fn new(
        settings: GrantSettings,
        codec: Arc<dyn CredentialCodec>,
        replay_guard: Option<Arc<dyn ConsumedCredentialStore>>,
    ) -> Self {
        Self {
            settings,
            codec,
            replay_guard,
        }
    }

    pub(super) fn ensure_client(&self, client_id: Option<&str>) -> ApplicationResult<()> {
        if client_id == Some(self.settings.client_id.as_str()) {
            Ok(())
        } else {
            warn!(client_id = ?client_id, "rejected unknown client");
            Err(ApplicationError::invalid_client("Invalid client_id"))
        }
    }

    pub(super) fn ensure_redirect_uri(&self, redirect_uri: Option<&str>) -> ApplicationResult<()> {
        if redirect_uri == Some(self.settings.redirect_uri.as_str()) {
            Ok(())
        } else {
            warn!(redirect_uri = ?redirect_uri, "rejected redirect_uri mismatch");
            Err(ApplicationError::invalid_request("Invalid redirect_uri"))
        }
    }

    /// Verify a presented credential for `purpose` and, when the replay guard
    /// is enabled, mark it used. Replays are reported like any other invalid
    /// credential.
    pub(super) async fn redeem(
        &self,
        token: &str,
        purpose: Purpose,
        messages: RejectionMessages,
    ) -> ApplicationResult<VerifiedCredential> {
        let credential = self
            .codec
            .verify_for(token, purpose)
            .map_err(|rejection| {
                warn!(%purpose, %rejection, "credential rejected");
                match rejection {
                    CredentialRejection::Expired { .. } => {
                        ApplicationError::invalid_grant(messages.expired)
                    }
                    CredentialRejection::Invalid => ApplicationError::invalid_grant(messages.invalid),
                }
            })?;

        if let Some(guard) = &self.replay_guard {
            if !guard.consume(&credential).await? {
                warn!(%purpose, credential_id = %credential.id, "credential replayed");
                return Err(ApplicationError::invalid_grant(messages.invalid));
            }
        }

        Ok(credential)
    }

    pub(super) fn issue_token_pair(&self, subject: &Subject) -> ApplicationResult<TokenResponse> {
        let access = self
            .codec
            .issue(Purpose::Access, subject, self.settings.access_token_ttl)?;
        let refresh = self
            .codec
            .issue(Purpose::Refresh, subject, self.settings.refresh_token_ttl)?;

        info!(
            %subject,
            access_expires_at = %access.expires_at,
            refresh_expires_at = %refresh.expires_at,
            "issued token pair"
        );

        Ok(TokenResponse::bearer(
            access.token,
            refresh.token,
            self.settings.access_token_ttl.as_secs(),
        ))
    }
}
