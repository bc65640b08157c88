// src/domain/credential/entity.rs
use super::value_objects::{CredentialId, Purpose, Subject};
use chrono::{DateTime, Utc};

/// A freshly minted credential and the window it is valid for.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub purpose: Purpose,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The payload of a credential whose signature and expiry have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCredential {
    pub id: CredentialId,
    pub purpose: Purpose,
    pub subject: Subject,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerifiedCredential {
    /// Second granularity: a credential is still usable during the second it
    /// expires in.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at.timestamp()
    }
}
