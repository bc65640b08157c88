// src/infrastructure/security/jwt_codec.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{credential::CredentialCodec, time::Clock},
};
use crate::domain::credential::{
    CredentialId, CredentialRejection, IssuedCredential, Purpose, Subject, VerifiedCredential,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::Arc, time::Duration};
use uuid::Uuid;

/// HS256 JWT credentials signed with one process-wide shared secret.
pub struct JwtCredentialCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialClaims {
    sub: String,
    purpose: Purpose,
    iat: i64,
    exp: i64,
    jti: String,
}

impl CredentialClaims {
    fn into_verified(self) -> Option<VerifiedCredential> {
        let subject = Subject::new(self.sub).ok()?;
        let id = CredentialId::new(self.jti).ok()?;
        let issued_at = DateTime::<Utc>::from_timestamp(self.iat, 0)?;
        let expires_at = DateTime::<Utc>::from_timestamp(self.exp, 0)?;
        if expires_at <= issued_at {
            return None;
        }

        Some(VerifiedCredential {
            id,
            purpose: self.purpose,
            subject,
            issued_at,
            expires_at,
        })
    }
}

impl JwtCredentialCodec {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock once the signature holds.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string(), "sub".to_string()]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
            clock,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<CredentialClaims, CredentialRejection> {
        decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "credential failed to decode");
                CredentialRejection::Invalid
            })
    }
}

fn timestamp(seconds: i64) -> ApplicationResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| ApplicationError::infrastructure("credential timestamp out of range"))
}

impl CredentialCodec for JwtCredentialCodec {
    fn issue(
        &self,
        purpose: Purpose,
        subject: &Subject,
        lifetime: Duration,
    ) -> ApplicationResult<IssuedCredential> {
        let lifetime_secs = i64::try_from(lifetime.as_secs())
            .map_err(|_| ApplicationError::infrastructure("credential lifetime out of range"))?;
        if lifetime_secs == 0 {
            return Err(ApplicationError::infrastructure(
                "credential lifetime must be at least one second",
            ));
        }

        let iat = self.clock.now().timestamp();
        let exp = iat
            .checked_add(lifetime_secs)
            .ok_or_else(|| ApplicationError::infrastructure("credential expiration overflow"))?;

        let claims = CredentialClaims {
            sub: subject.as_str().to_string(),
            purpose,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(IssuedCredential {
            token,
            purpose,
            issued_at: timestamp(iat)?,
            expires_at: timestamp(exp)?,
        })
    }

    fn verify(&self, token: &str) -> Result<VerifiedCredential, CredentialRejection> {
        let credential = self
            .decode_claims(token)?
            .into_verified()
            .ok_or(CredentialRejection::Invalid)?;

        if credential.is_expired_at(self.clock.now()) {
            return Err(CredentialRejection::Expired {
                purpose: credential.purpose,
            });
        }

        Ok(credential)
    }
}
