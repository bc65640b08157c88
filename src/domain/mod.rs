pub mod credential;
pub mod errors;
