// src/config.rs
use crate::application::commands::grants::GrantSettings;
use std::{env, time::Duration};
use thiserror::Error;
use url::Url;

const MIN_SECRET_BYTES: usize = 32;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    client_id: String,
    redirect_uri: String,
    jwt_secret: String,
    auth_code_ttl: Duration,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    single_use_credentials: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".into()
}

fn default_auth_code_expiry() -> u64 {
    300
}

fn default_access_token_expiry() -> u64 {
    3600
}

fn default_refresh_token_expiry() -> u64 {
    60 * 60 * 24 * 14
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys. `.env` loading is the
    /// caller's job so it happens before tracing reads `RUST_LOG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead of the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("LISTEN_ADDR")
            .or_else(|| lookup("PORT").map(|port| format!("0.0.0.0:{}", port.trim())))
            .unwrap_or_else(default_listen_addr);

        let client_id = required(&lookup, "CLIENT_ID")?;
        let redirect_uri = required(&lookup, "REDIRECT_URI")?;
        Url::parse(&redirect_uri)
            .map_err(|err| ConfigError::Invalid(format!("REDIRECT_URI is not a valid URL: {err}")))?;

        let jwt_secret = required(&lookup, "JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Invalid(format!(
                "JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        let auth_code_ttl = ttl(&lookup, "AUTH_CODE_EXPIRY", default_auth_code_expiry())?;
        let access_token_ttl = ttl(&lookup, "ACCESS_TOKEN_EXPIRY", default_access_token_expiry())?;
        let refresh_token_ttl =
            ttl(&lookup, "REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry())?;

        let single_use_credentials = lookup("SINGLE_USE_CREDENTIALS")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            client_id,
            redirect_uri,
            jwt_secret,
            auth_code_ttl,
            access_token_ttl,
            refresh_token_ttl,
            single_use_credentials,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Whether codes and refresh tokens are rejected after their first use.
    pub fn single_use_credentials(&self) -> bool {
        self.single_use_credentials
    }

    pub fn grant_settings(&self) -> GrantSettings {
        GrantSettings {
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
            auth_code_ttl: self.auth_code_ttl,
            access_token_ttl: self.access_token_ttl,
            refresh_token_ttl: self.refresh_token_ttl,
        }
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn ttl<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let seconds = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number of seconds")))?,
        None => default,
    };

    if seconds == 0 {
        return Err(ConfigError::Invalid(format!("{key} must be greater than zero")));
    }

    Ok(Duration::from_secs(seconds))
}
