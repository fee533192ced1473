//! Server API

pub mod client;

pub use client::{fetch_stream_config, get_api_base, HttpLogin};
