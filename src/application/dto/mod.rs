pub mod grant;

pub use grant::{AuthorizationRedirect, TokenResponse};
