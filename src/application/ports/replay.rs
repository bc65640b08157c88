// src/application/ports/replay.rs
use crate::application::ApplicationResult;
use crate::domain::credential::VerifiedCredential;
use async_trait::async_trait;

#[async_trait]
pub trait ConsumedCredentialStore: Send + Sync {
    /// Record the credential as used. Returns true the first time a given
    /// credential id is consumed and false on every later attempt until the
    /// credential expires.
    async fn consume(&self, credential: &VerifiedCredential) -> ApplicationResult<bool>;
}
