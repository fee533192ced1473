//! Streaming Transport Seam
//!
//! The video stream and data channel are provided by an external streaming
//! client. The page only relies on the small surface described here: a
//! handful of callbacks (delivered as [`TransportEvent`]s) plus `connect`,
//! `send_message` and `terminate`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connection::PeerState;

/// Delivery mode of the data channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpcMode {
    /// Ordered, retransmitted delivery
    Reliable,
    /// Unordered, best-effort delivery
    Lossy,
}

impl IpcMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpcMode::Reliable => "reliable",
            IpcMode::Lossy => "lossy",
        }
    }
}

/// Settings handed to the streaming client
///
/// The signaling host is not part of the settings: the page always uses
/// its own hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    /// Identifier the robot registers under on the signaling broker
    pub device_uid: String,
    /// Path of the MQTT-over-WebSocket endpoint
    pub signaling_path: String,
    /// Port of the MQTT-over-WebSocket endpoint
    pub signaling_port: u16,
    /// Data channel delivery mode
    pub ipc_mode: IpcMode,
    /// Skip the video track and open only the data channel
    #[serde(default)]
    pub datachannel_only: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            device_uid: "Mekk".to_string(),
            signaling_path: "/mqtt".to_string(),
            signaling_port: 8443,
            ipc_mode: IpcMode::Reliable,
            datachannel_only: false,
        }
    }
}

/// Callbacks from the streaming client, as values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A media stream was attached to the video element
    StreamArrived,
    /// The media stream went away
    StreamStopped,
    /// The peer connection changed state
    ConnectionState(PeerState),
    /// A data channel opened
    DataChannelOpened { reliable: bool },
    /// The connection attempt timed out
    TimedOut,
    /// Text received on the data channel
    Message(String),
}

/// Errors raised by a streaming client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The client library could not be found or constructed
    #[error("Streaming client unavailable: {0}")]
    Unavailable(String),

    /// Writing to the data channel failed
    #[error("Failed to send message: {0}")]
    Send(String),
}

/// A streaming client connection to the robot
pub trait StreamingTransport {
    /// Start signaling and open the peer connection
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Write one text message to the data channel
    fn send_message(&mut self, message: &str) -> Result<(), TransportError>;

    /// Tear down the peer connection
    fn terminate(&mut self);
}

impl<T: StreamingTransport + ?Sized> StreamingTransport for Box<T> {
    fn connect(&mut self) -> Result<(), TransportError> {
        (**self).connect()
    }

    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        (**self).send_message(message)
    }

    fn terminate(&mut self) {
        (**self).terminate()
    }
}
