// src/application/ports/mod.rs
pub mod credential;
pub mod replay;
pub mod time;
