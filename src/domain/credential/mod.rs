// src/domain/credential/mod.rs
pub mod entity;
pub mod rejection;
pub mod value_objects;

pub use entity::{IssuedCredential, VerifiedCredential};
pub use rejection::CredentialRejection;
pub use value_objects::{CredentialId, Purpose, Subject};
