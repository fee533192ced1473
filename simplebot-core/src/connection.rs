//! Connection Phases
//!
//! The page's own view of the streaming connection. The streaming library
//! owns the real peer connection; these phases are fed from its callbacks
//! and from the Connect/Disconnect buttons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the page's connection to the robot
///
/// The numeric codes are the ones the page has always used:
/// `0` connected, `1` connecting, `2` timed out, `3` idle, `4` disconnecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    /// Peer connection established
    Connected,
    /// Connect requested, waiting for the peer
    Connecting,
    /// Attempt timed out or the peer dropped
    TimedOut,
    /// Never connected, or cleanly disconnected
    Idle,
    /// User asked to disconnect, teardown in progress
    Disconnecting,
}

impl ConnectionPhase {
    pub const ALL: [ConnectionPhase; 5] = [
        ConnectionPhase::Connected,
        ConnectionPhase::Connecting,
        ConnectionPhase::TimedOut,
        ConnectionPhase::Idle,
        ConnectionPhase::Disconnecting,
    ];

    /// Numeric phase code
    pub fn code(&self) -> u8 {
        match self {
            ConnectionPhase::Connected => 0,
            ConnectionPhase::Connecting => 1,
            ConnectionPhase::TimedOut => 2,
            ConnectionPhase::Idle => 3,
            ConnectionPhase::Disconnecting => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.code() == code)
    }

    /// Status shown next to the Connect/Disconnect buttons
    pub fn display_status(&self) -> DisplayStatus {
        match self {
            ConnectionPhase::Connected => DisplayStatus::Connected,
            ConnectionPhase::Connecting => DisplayStatus::Connecting,
            ConnectionPhase::TimedOut
            | ConnectionPhase::Idle
            | ConnectionPhase::Disconnecting => DisplayStatus::Disconnected,
        }
    }

    /// Robot log line written when the page enters this phase
    pub fn log_line(&self) -> Option<&'static str> {
        match self {
            ConnectionPhase::Connected => Some("Robot connection established"),
            ConnectionPhase::Connecting => Some("Connecting to robot"),
            ConnectionPhase::TimedOut => Some("Disconnected from robot"),
            ConnectionPhase::Idle | ConnectionPhase::Disconnecting => None,
        }
    }

    /// Message over the video area while no stream is playing
    pub fn overlay_text(&self) -> &'static str {
        match self {
            ConnectionPhase::Connecting => "Establishing connection...",
            ConnectionPhase::Idle => "Press connect to establish connection",
            ConnectionPhase::Connected
            | ConnectionPhase::TimedOut
            | ConnectionPhase::Disconnecting => "Connection timed out. Please try again",
        }
    }
}

impl Default for ConnectionPhase {
    fn default() -> Self {
        ConnectionPhase::Idle
    }
}

/// Three-valued status for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Disconnected => "Disconnected",
            DisplayStatus::Connecting => "Connecting",
            DisplayStatus::Connected => "Connected",
        }
    }

    /// CSS color of the status label
    pub fn color(&self) -> &'static str {
        match self {
            DisplayStatus::Disconnected => "#fc030b",
            DisplayStatus::Connecting => "#fcb103",
            DisplayStatus::Connected => "#03fc52",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `RTCPeerConnectionState` as reported by the streaming library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl PeerState {
    /// Parse the browser's state string; unknown strings yield `None`
    pub fn parse(state: &str) -> Option<Self> {
        match state {
            "new" => Some(PeerState::New),
            "connecting" => Some(PeerState::Connecting),
            "connected" => Some(PeerState::Connected),
            "disconnected" => Some(PeerState::Disconnected),
            "failed" => Some(PeerState::Failed),
            "closed" => Some(PeerState::Closed),
            _ => None,
        }
    }

    /// Whether this state means the peer is gone
    pub fn is_lost(&self) -> bool {
        matches!(
            self,
            PeerState::Disconnected | PeerState::Failed | PeerState::Closed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_codes_round_trip() {
        for phase in ConnectionPhase::ALL {
            assert_eq!(ConnectionPhase::from_code(phase.code()), Some(phase));
        }
        assert_eq!(ConnectionPhase::from_code(5), None);
    }

    #[test]
    fn test_display_mapping_covers_all_codes() {
        let statuses: Vec<_> = (0..5)
            .map(|code| ConnectionPhase::from_code(code).unwrap().display_status())
            .collect();
        assert_eq!(
            statuses,
            vec![
                DisplayStatus::Connected,
                DisplayStatus::Connecting,
                DisplayStatus::Disconnected,
                DisplayStatus::Disconnected,
                DisplayStatus::Disconnected,
            ]
        );
    }

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(ConnectionPhase::default(), ConnectionPhase::Idle);
        assert_eq!(ConnectionPhase::Idle.log_line(), None);
    }

    #[test]
    fn test_overlay_text() {
        assert_eq!(
            ConnectionPhase::Idle.overlay_text(),
            "Press connect to establish connection"
        );
        assert_eq!(
            ConnectionPhase::Connecting.overlay_text(),
            "Establishing connection..."
        );
        assert_eq!(
            ConnectionPhase::TimedOut.overlay_text(),
            "Connection timed out. Please try again"
        );
    }

    #[test]
    fn test_peer_state_parse() {
        assert_eq!(PeerState::parse("connected"), Some(PeerState::Connected));
        assert!(PeerState::parse("failed").unwrap().is_lost());
        assert!(!PeerState::parse("connecting").unwrap().is_lost());
        assert_eq!(PeerState::parse("bogus"), None);
    }
}
