// src/application/commands/grants/authorize.rs
use super::GrantCommandService;
use crate::{
    application::{
        dto::AuthorizationRedirect,
        error::{ApplicationError, ApplicationResult},
    },
    domain::credential::{Purpose, Subject},
};
use tracing::{info, warn};
use url::Url;

pub const RESPONSE_TYPE_CODE: &str = "code";

pub struct AuthorizeCommand {
    pub response_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
}

impl GrantCommandService {
    /// Validate an authorization request and mint a one-time code for the
    /// client. Checks run in order: response_type, client_id, redirect_uri.
    pub fn authorize(&self, command: AuthorizeCommand) -> ApplicationResult<AuthorizationRedirect> {
        if command.response_type.as_deref() != Some(RESPONSE_TYPE_CODE) {
            warn!(response_type = ?command.response_type, "rejected response_type");
            return Err(ApplicationError::unsupported_response_type(
                "Response type must be code",
            ));
        }
        self.ensure_client(command.client_id.as_deref())?;
        self.ensure_redirect_uri(command.redirect_uri.as_deref())?;

        // Two-legged flow: the client is the principal.
        let subject = Subject::new(self.settings.client_id.clone())?;
        let code = self
            .codec
            .issue(Purpose::Code, &subject, self.settings.auth_code_ttl)?;

        let location = redirect_location(
            &self.settings.redirect_uri,
            &code.token,
            command.state.as_deref(),
        )?;

        info!(%subject, expires_at = %code.expires_at, "issued authorization code");

        Ok(AuthorizationRedirect {
            location,
            code: code.token,
        })
    }
}

fn redirect_location(
    redirect_uri: &str,
    code: &str,
    state: Option<&str>,
) -> ApplicationResult<String> {
    let mut url = Url::parse(redirect_uri).map_err(|err| {
        ApplicationError::infrastructure(format!("configured redirect_uri is not a URL: {err}"))
    })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("code", code);
        if let Some(state) = state {
            query.append_pair("state", state);
        }
    }

    Ok(url.into())
}
