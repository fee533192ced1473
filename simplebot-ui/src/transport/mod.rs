//! Streaming Client Binding
//!
//! Adapts the `picamera.js` streaming client to
//! [`simplebot_core::StreamingTransport`].

pub mod picamera;

pub use picamera::{EventSink, PiCameraTransport, VIDEO_ELEMENT_ID};
