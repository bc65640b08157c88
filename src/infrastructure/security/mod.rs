// src/infrastructure/security/mod.rs
pub mod consumed_store;
pub mod jwt_codec;
