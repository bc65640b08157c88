// src/application/ports/credential.rs
use crate::application::ApplicationResult;
use crate::domain::credential::{
    CredentialRejection, IssuedCredential, Purpose, Subject, VerifiedCredential,
};
use std::time::Duration;

/// Mints and checks signed, self-contained credentials. Implementations own
/// the signing key; signing and verification are synchronous CPU work.
pub trait CredentialCodec: Send + Sync {
    /// Mint a credential for `subject` that expires `lifetime` from now.
    /// A zero lifetime is an error.
    fn issue(
        &self,
        purpose: Purpose,
        subject: &Subject,
        lifetime: Duration,
    ) -> ApplicationResult<IssuedCredential>;

    /// Check encoding, signature and expiry. Never panics; anything that is
    /// not a clean expiry is reported as `Invalid`.
    fn verify(&self, token: &str) -> Result<VerifiedCredential, CredentialRejection>;

    /// Like `verify`, but a credential of any other purpose is `Invalid`,
    /// even when it has also expired.
    fn verify_for(
        &self,
        token: &str,
        expected: Purpose,
    ) -> Result<VerifiedCredential, CredentialRejection> {
        match self.verify(token) {
            Ok(credential) if credential.purpose == expected => Ok(credential),
            Err(CredentialRejection::Expired { purpose }) if purpose == expected => {
                Err(CredentialRejection::Expired { purpose })
            }
            Ok(_) | Err(_) => Err(CredentialRejection::Invalid),
        }
    }
}
