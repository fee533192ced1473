//! SimpleBot Remote Control
//!
//! Web front-end for a remotely operated robot, built with Leptos (WASM).
//!
//! # Features
//!
//! - Robot login with a shared password
//! - Live camera feed over WebRTC (via `picamera.js`)
//! - Keyboard and on-screen driving in manual mode
//! - Object search and detection panels in autonomous mode
//! - Robot log fed from the data channel
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page state lives in `simplebot_core::InteractionSession`;
//! this crate binds it to signals, the DOM and the streaming client.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod transport;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
