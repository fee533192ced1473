//! Login Flow
//!
//! Form validation and response interpretation for `POST /api/login`. The
//! HTTP call itself is behind [`LoginBackend`] so the browser (gloo-net) and
//! the CLI (reqwest) share the same rules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/login";

/// Credentials posted to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Body returned by the server, on success or failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Video stream URL for the interaction page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    /// Name the server accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Error text on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// What the login page hands to the interaction page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub name: String,
    pub stream_url: Option<String>,
}

/// Raw outcome of the HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    /// 2xx status
    pub ok: bool,
    /// Parsed body, if it was JSON
    pub body: Option<LoginResponse>,
}

/// Login failures, displayed inline under the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please enter both name and password")]
    MissingCredentials,

    #[error("{0}")]
    Rejected(String),

    #[error("Unable to connect to server")]
    Unreachable,
}

/// The login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }

    /// Build the request, refusing blank fields
    pub fn validate(&self) -> Result<LoginRequest, LoginError> {
        if self.name.trim().is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        Ok(LoginRequest {
            name: self.name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Turn the server's reply into a handoff or a displayable error
pub fn interpret_reply(reply: LoginReply, name: &str) -> Result<Handoff, LoginError> {
    if reply.ok {
        let body = reply.body.unwrap_or_default();
        return Ok(Handoff {
            name: body.name.unwrap_or_else(|| name.to_string()),
            stream_url: body.stream_url,
        });
    }

    let message = reply
        .body
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| "Login failed".to_string());
    Err(LoginError::Rejected(message))
}

/// Performs the login HTTP request
#[async_trait(?Send)]
pub trait LoginBackend {
    /// Post the credentials. Network failures map to [`LoginError::Unreachable`].
    async fn post_login(&self, request: &LoginRequest) -> Result<LoginReply, LoginError>;
}

/// Validate, post and interpret a login attempt
///
/// Blank fields are rejected before the backend is called.
pub async fn submit_login<B>(backend: &B, form: &LoginForm) -> Result<Handoff, LoginError>
where
    B: LoginBackend + ?Sized,
{
    let request = form.validate()?;
    tracing::debug!(name = %request.name, "Submitting login");
    let reply = backend.post_login(&request).await?;
    interpret_reply(reply, &request.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingBackend {
        calls: Cell<usize>,
        reply: Result<LoginReply, LoginError>,
    }

    impl CountingBackend {
        fn new(reply: Result<LoginReply, LoginError>) -> Self {
            Self {
                calls: Cell::new(0),
                reply,
            }
        }
    }

    #[async_trait(?Send)]
    impl LoginBackend for CountingBackend {
        async fn post_login(&self, _request: &LoginRequest) -> Result<LoginReply, LoginError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn ok_reply(stream_url: Option<&str>) -> LoginReply {
        LoginReply {
            ok: true,
            body: Some(LoginResponse {
                stream_url: stream_url.map(str::to_string),
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_blank_fields_never_reach_backend() {
        let backend = CountingBackend::new(Ok(ok_reply(None)));
        for (name, password) in [("", "secret"), ("ada", ""), ("   ", "secret"), ("", "")] {
            let result = submit_login(&backend, &LoginForm::new(name, password)).await;
            assert_eq!(result, Err(LoginError::MissingCredentials));
        }
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_success_carries_name_and_stream_url() {
        let backend = CountingBackend::new(Ok(ok_reply(Some("https://robot.local/stream"))));
        let handoff = submit_login(&backend, &LoginForm::new("ada", "secret"))
            .await
            .unwrap();
        assert_eq!(handoff.name, "ada");
        assert_eq!(
            handoff.stream_url.as_deref(),
            Some("https://robot.local/stream")
        );
        assert_eq!(backend.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_success_without_stream_url() {
        let backend = CountingBackend::new(Ok(LoginReply { ok: true, body: None }));
        let handoff = submit_login(&backend, &LoginForm::new("ada", "secret"))
            .await
            .unwrap();
        assert_eq!(handoff.stream_url, None);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let backend = CountingBackend::new(Err(LoginError::Unreachable));
        let err = submit_login(&backend, &LoginForm::new("ada", "secret"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unable to connect to server");
    }

    #[test]
    fn test_rejection_uses_server_message() {
        let reply = LoginReply {
            ok: false,
            body: Some(LoginResponse {
                message: Some("Incorrect password for robot".into()),
                ..Default::default()
            }),
        };
        assert_eq!(
            interpret_reply(reply, "ada"),
            Err(LoginError::Rejected("Incorrect password for robot".into()))
        );
    }

    #[test]
    fn test_rejection_falls_back_to_generic_message() {
        let reply = LoginReply { ok: false, body: None };
        let err = interpret_reply(reply, "ada").unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn test_response_field_names() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"streamUrl":"http://pi:8080","name":"ada"}"#).unwrap();
        assert_eq!(body.stream_url.as_deref(), Some("http://pi:8080"));
        let json = serde_json::to_string(&LoginResponse::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
