//! Robot Login
//!
//! Checks credentials posted by the login page against the shared robot
//! password and builds the handoff the interaction page needs.

use simplebot_core::{LoginRequest, LoginResponse};
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please enter both name and password")]
    MissingCredentials,

    #[error("Incorrect password for robot")]
    IncorrectPassword,

    #[error("Robot login is not configured")]
    NotConfigured,
}

/// Verifies robot logins
#[derive(Debug, Clone)]
pub struct Authenticator {
    password: Option<String>,
    stream_url: Option<String>,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            password: config.password.clone().filter(|p| !p.is_empty()),
            stream_url: config.stream_url.clone().filter(|u| !u.trim().is_empty()),
        }
    }

    /// Whether a password has been set
    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }

    /// Check a login request and build the success body
    pub fn verify(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let name = request.name.trim();
        if name.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let expected = self.password.as_deref().ok_or(AuthError::NotConfigured)?;
        if !constant_time_eq(expected.as_bytes(), request.password.as_bytes()) {
            tracing::info!(name = %name, "Login refused");
            return Err(AuthError::IncorrectPassword);
        }

        tracing::info!(name = %name, "Login accepted");
        Ok(LoginResponse {
            stream_url: self.stream_url.clone(),
            name: Some(name.to_string()),
            message: None,
        })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
