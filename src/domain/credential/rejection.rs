// src/domain/credential/rejection.rs
use super::value_objects::Purpose;
use thiserror::Error;

/// Outcome of a failed verification. Only expiry is reported on its own;
/// every other failure (encoding, signature, claims, purpose) is `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialRejection {
    #[error("{purpose} credential expired")]
    Expired { purpose: Purpose },
    #[error("credential invalid")]
    Invalid,
}
