// src/application/commands/grants/mod.rs
mod authorization_code;
mod authorize;
mod refresh;
mod service;
mod token;


pub use authorize::AuthorizeCommand;
pub use service::{GrantCommandService, GrantSettings};
pub use token::{GRANT_TYPE_AUTHORIZATION_CODE, GRANT_TYPE_REFRESH_TOKEN, TokenCommand};
