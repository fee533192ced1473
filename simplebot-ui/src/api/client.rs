//! HTTP API Client
//!
//! Functions for communicating with the SimpleBot server.

use async_trait::async_trait;
use gloo_net::http::Request;
use simplebot_core::{
    LoginBackend, LoginError, LoginReply, LoginRequest, LoginResponse, StreamConfig, LOGIN_PATH,
};

/// Local storage key that points the UI at another server (development)
const API_URL_KEY: &str = "simplebot_api_url";

/// Get the API base URL from local storage, or use the page's own origin
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_default();
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// `POST /api/login` through gloo-net
pub struct HttpLogin;

#[async_trait(?Send)]
impl LoginBackend for HttpLogin {
    async fn post_login(&self, request: &LoginRequest) -> Result<LoginReply, LoginError> {
        let url = format!("{}{}", get_api_base(), LOGIN_PATH);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| {
                web_sys::console::error_1(&format!("Login request build error: {}", e).into());
                LoginError::Unreachable
            })?
            .send()
            .await
            .map_err(|e| {
                web_sys::console::error_1(&format!("Error during login: {}", e).into());
                LoginError::Unreachable
            })?;

        let ok = response.ok();
        let body = response.json::<LoginResponse>().await.ok();
        Ok(LoginReply { ok, body })
    }
}

/// Fetch the streaming client settings
pub async fn fetch_stream_config() -> Result<StreamConfig, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/stream-config", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server returned {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
