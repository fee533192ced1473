//! # SimpleBot Core
//!
//! Logic shared by the SimpleBot server, CLI and web UI. Nothing in here
//! touches the network or the DOM, so it builds for both native targets and
//! `wasm32-unknown-unknown`.
//!
//! ## Modules
//!
//! - [`protocol`]: JSON envelopes exchanged with the robot over the data channel
//! - [`connection`]: The five connection phases and their display status
//! - [`controls`]: Single-key drive controls
//! - [`transport`]: The streaming client seam and its settings
//! - [`session`]: State of one interaction page
//! - [`login`]: Login form validation and reply handling
//! - [`clock`]: Injectable time source for log timestamps

pub mod clock;
pub mod connection;
pub mod controls;
pub mod login;
pub mod protocol;
pub mod session;
pub mod transport;

pub use clock::{format_time, Clock, ManualClock, SystemClock};
pub use connection::{ConnectionPhase, DisplayStatus, PeerState};
pub use controls::{direction_for_key, key_label, DriveControls};
pub use login::{
    interpret_reply, submit_login, Handoff, LoginBackend, LoginError, LoginForm, LoginReply,
    LoginRequest, LoginResponse, LOGIN_PATH,
};
pub use protocol::{decode_batch, decode_line, Command, Direction, Inbound, Mode, ProtocolError};
pub use session::{Epoch, InboundReport, InteractionSession, LogEntry, Notice, SendError};
pub use transport::{IpcMode, StreamConfig, StreamingTransport, TransportError, TransportEvent};
