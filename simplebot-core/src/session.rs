//! Interaction Session
//!
//! Everything the interaction page knows about the robot: the connection
//! phase, the robot log, discovered objects, the exploration mode and the
//! drive controls. The session owns the streaming transport and is the only
//! place commands are written to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use simplebot_core::{InteractionSession, SystemClock};
//!
//! let mut session = InteractionSession::new(SystemClock);
//! let epoch = session.connect_with(|epoch| build_transport(epoch))?;
//! // ... later, from the transport callbacks:
//! session.handle_event_from(epoch, event);
//! ```

use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::clock::{format_time, Clock, SystemClock};
use crate::connection::{ConnectionPhase, DisplayStatus, PeerState};
use crate::controls::{direction_for_key, DriveControls};
use crate::protocol::{batch_lines, decode_line, Command, Direction, Inbound, Mode};
use crate::transport::{StreamingTransport, TransportError, TransportEvent};

/// Identifies one transport instance; events from replaced transports are dropped
pub type Epoch = u64;

/// One line of the robot log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: NaiveDateTime,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.at), self.text)
    }
}

/// User-facing notification (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }
}

/// Why a command was not written to the robot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Not connected to robot for command sending")]
    NotConnected,

    #[error("Not connected to robot for exploration mode toggle")]
    ModeToggleNotConnected,

    #[error("Switch to {required} mode to use robot commands")]
    WrongMode { required: Mode },

    #[error("Type a command for the robot first")]
    EmptyCommand,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<SendError> for Notice {
    fn from(err: SendError) -> Self {
        Notice::Error(err.to_string())
    }
}

/// Result of applying an inbound payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundReport {
    /// Envelopes reflected in state
    pub applied: usize,
    /// Envelopes that failed to decode
    pub rejected: usize,
    /// Notifications raised by applied envelopes
    pub notices: Vec<Notice>,
}

const NO_NEAREST_OBJECT: &str = "No nearest object detected";
const NEAREST_OBJECT_MANUAL: &str = "Switch to autonomous mode to see nearest object(s) detected";
const OBJECTS_FOUND_MANUAL: &str = "Switch to autonomous mode to see all objects found";

/// State of one interaction page
pub struct InteractionSession<T, C = SystemClock> {
    clock: C,
    transport: Option<T>,
    epoch: Epoch,
    phase: ConnectionPhase,
    connected: bool,
    live: bool,
    mode: Mode,
    controls: DriveControls,
    text_focus: bool,
    command_text: String,
    log: Vec<LogEntry>,
    objects_found: BTreeSet<String>,
    nearest_object: Option<String>,
    last_message: String,
}

impl<T: StreamingTransport> Default for InteractionSession<T, SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<T, C> InteractionSession<T, C>
where
    T: StreamingTransport,
    C: Clock,
{
    /// Create a session in manual mode, idle, with the opening log line
    pub fn new(clock: C) -> Self {
        let mut session = Self {
            clock,
            transport: None,
            epoch: 0,
            phase: ConnectionPhase::Idle,
            connected: false,
            live: false,
            mode: Mode::Manual,
            controls: DriveControls::new(),
            text_focus: false,
            command_text: String::new(),
            log: Vec::new(),
            objects_found: BTreeSet::new(),
            nearest_object: None,
            last_message: String::new(),
        };
        session.push_log("Opened remote control website");
        session
    }

    // ============ Accessors ============

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn display_status(&self) -> DisplayStatus {
        self.phase.display_status()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn objects_found(&self) -> &BTreeSet<String> {
        &self.objects_found
    }

    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    pub fn held_direction(&self) -> Option<Direction> {
        self.controls.held()
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.controls.is_pressed(direction)
    }

    /// Text of the "Nearest Object" panel
    pub fn nearest_object_text(&self) -> String {
        if self.mode == Mode::Manual {
            return NEAREST_OBJECT_MANUAL.to_string();
        }
        match self.nearest_object.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => NO_NEAREST_OBJECT.to_string(),
        }
    }

    /// Text of the "Objects Found" panel, one name per line
    pub fn objects_found_text(&self) -> String {
        if self.mode == Mode::Manual {
            return OBJECTS_FOUND_MANUAL.to_string();
        }
        self.objects_found
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ============ Command bar ============

    pub fn set_command_text(&mut self, text: impl Into<String>) {
        self.command_text = text.into();
    }

    /// While the command box has focus, keyboard driving is off
    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    // ============ Connection lifecycle ============

    /// Start a new connection with a transport built for the next epoch
    ///
    /// Any existing transport is terminated first. A transport that cannot
    /// be built or started leaves the session timed out.
    pub fn connect_with<F>(&mut self, build: F) -> Result<Epoch, TransportError>
    where
        F: FnOnce(Epoch) -> Result<T, TransportError>,
    {
        self.set_phase(ConnectionPhase::Connecting);

        if let Some(mut previous) = self.transport.take() {
            tracing::debug!(epoch = self.epoch, "Replacing streaming transport");
            previous.terminate();
        }
        self.connected = false;
        self.live = false;
        self.epoch += 1;

        let started = build(self.epoch).and_then(|mut transport| match transport.connect() {
            Ok(()) => Ok(transport),
            Err(e) => {
                transport.terminate();
                Err(e)
            }
        });

        match started {
            Ok(transport) => {
                self.transport = Some(transport);
                Ok(self.epoch)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Streaming transport failed to start");
                self.set_phase(ConnectionPhase::TimedOut);
                Err(e)
            }
        }
    }

    /// Start a new connection with an already built transport
    pub fn connect(&mut self, transport: T) -> Result<Epoch, TransportError> {
        self.connect_with(|_| Ok(transport))
    }

    /// User-requested disconnect. Returns `false` when already idle.
    pub fn disconnect(&mut self) -> bool {
        if self.phase == ConnectionPhase::Idle {
            return false;
        }

        self.set_phase(ConnectionPhase::Disconnecting);
        self.push_log("Disconnected from robot");

        if let Some(mut transport) = self.transport.take() {
            transport.terminate();
        }
        self.connected = false;
        self.live = false;
        self.controls.release_all();
        self.set_phase(ConnectionPhase::Idle);
        true
    }

    /// Terminate the transport without touching the log, for page unmount
    pub fn shutdown(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            tracing::debug!(epoch = self.epoch, "Terminating transport on shutdown");
            transport.terminate();
        }
        self.connected = false;
        self.live = false;
    }

    /// Move to a phase, logging the transition. Writing the current phase
    /// again changes nothing.
    pub fn set_phase(&mut self, phase: ConnectionPhase) -> bool {
        if self.phase == phase {
            return false;
        }
        tracing::debug!(from = self.phase.code(), to = phase.code(), "Connection phase changed");
        self.phase = phase;
        if let Some(line) = phase.log_line() {
            self.push_log(line);
        }
        true
    }

    /// Apply an event from the transport of the given epoch
    ///
    /// Events from a terminated or replaced transport are dropped.
    pub fn handle_event_from(&mut self, epoch: Epoch, event: TransportEvent) -> Vec<Notice> {
        if epoch != self.epoch || self.transport.is_none() {
            tracing::debug!(epoch, current = self.epoch, ?event, "Dropping stale transport event");
            return Vec::new();
        }
        self.handle_event(event)
    }

    /// Apply an event from the current transport
    pub fn handle_event(&mut self, event: TransportEvent) -> Vec<Notice> {
        match event {
            TransportEvent::StreamArrived => {
                tracing::debug!("Video stream received");
                self.live = true;
                self.set_phase(ConnectionPhase::Connected);
            }
            TransportEvent::StreamStopped => {
                tracing::debug!("Video stream stopped");
            }
            TransportEvent::ConnectionState(state) => {
                tracing::debug!(?state, "Peer connection state changed");
                if state == PeerState::Connected {
                    self.connected = true;
                    self.set_phase(ConnectionPhase::Connected);
                } else if state.is_lost() {
                    self.connected = false;
                    self.live = false;
                    self.controls.release_all();
                    self.set_phase(ConnectionPhase::TimedOut);
                }
            }
            TransportEvent::DataChannelOpened { reliable } => {
                if reliable {
                    tracing::debug!("Reliable data channel is open");
                } else {
                    tracing::debug!("Data channel is open");
                }
            }
            TransportEvent::TimedOut => {
                tracing::debug!("Connection attempt timed out");
                self.live = false;
                self.set_phase(ConnectionPhase::TimedOut);
            }
            TransportEvent::Message(payload) => {
                return self.apply_payload(&payload).notices;
            }
        }
        Vec::new()
    }

    // ============ Inbound messages ============

    /// Apply a newline-separated batch of envelopes, each line on its own
    pub fn apply_payload(&mut self, payload: &str) -> InboundReport {
        let mut report = InboundReport::default();

        for line in batch_lines(payload) {
            self.last_message = line.to_string();
            match decode_line(line) {
                Ok(message) => {
                    tracing::debug!(kind = message.kind(), "Applying robot message");
                    report.applied += 1;
                    if let Some(notice) = self.apply(message) {
                        report.notices.push(notice);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, line, "Ignoring robot message");
                    report.rejected += 1;
                }
            }
        }

        report
    }

    /// Apply one decoded envelope
    pub fn apply(&mut self, message: Inbound) -> Option<Notice> {
        match message {
            Inbound::Objects(mut names) => {
                names.sort();
                names.dedup();
                self.objects_found.extend(names.iter().cloned());
                self.nearest_object = Some(names.join(", "));
                None
            }
            Inbound::Log(text) => {
                self.push_log(text);
                None
            }
            Inbound::Mode(mode) => {
                self.mode = mode;
                if mode == Mode::Autonomous {
                    self.controls.release_all();
                }
                self.push_log(format!("Exploration mode switched to {}", mode));
                Some(Notice::Success(format!(
                    "Robot exploration mode set to {}",
                    mode
                )))
            }
        }
    }

    // ============ Outbound commands ============

    /// Write a command to the robot. Nothing reaches the transport while
    /// the page is not connected.
    pub fn send(&mut self, command: &Command) -> Result<(), SendError> {
        if !self.connected {
            tracing::warn!(?command, "Not connected for command sending");
            return Err(SendError::NotConnected);
        }
        let transport = self.transport.as_mut().ok_or(SendError::NotConnected)?;
        let text = command.encode();
        transport.send_message(&text)?;
        tracing::debug!(command = %text, "Sent command");
        Ok(())
    }

    /// Press a drive button. Returns `Ok(true)` when a motor command went
    /// out, `Ok(false)` when the press was suppressed.
    pub fn press(&mut self, direction: Direction) -> Result<bool, SendError> {
        if self.mode == Mode::Autonomous {
            return Ok(false);
        }
        if !self.controls.press(direction) {
            return Ok(false);
        }
        self.send(&Command::Motor(direction)).map(|_| true)
    }

    pub fn release(&mut self, direction: Direction) -> bool {
        self.controls.release(direction)
    }

    /// Keyboard press, ignored while the command box has focus
    pub fn press_key(&mut self, key: &str) -> Result<bool, SendError> {
        if self.text_focus {
            return Ok(false);
        }
        match direction_for_key(key) {
            Some(direction) => self.press(direction),
            None => Ok(false),
        }
    }

    pub fn release_key(&mut self, key: &str) -> bool {
        direction_for_key(key)
            .map(|direction| self.release(direction))
            .unwrap_or(false)
    }

    /// Send the command box text as a "find" request (autonomous mode only)
    pub fn submit_find(&mut self) -> Result<(), SendError> {
        if self.mode != Mode::Autonomous {
            return Err(SendError::WrongMode {
                required: Mode::Autonomous,
            });
        }
        let text = self.command_text.trim().to_string();
        if text.is_empty() {
            return Err(SendError::EmptyCommand);
        }
        self.send(&Command::Find(text))?;
        self.command_text.clear();
        Ok(())
    }

    /// Ask the robot to switch to the other mode
    ///
    /// The mode flag itself changes when the robot confirms with a "mode"
    /// message.
    pub fn toggle_mode(&mut self) -> Result<Mode, SendError> {
        if !self.connected {
            tracing::warn!("Not connected for exploration mode toggle");
            return Err(SendError::ModeToggleNotConnected);
        }
        let target = self.mode.toggled();
        self.send(&Command::Mode(target))?;
        self.push_log(format!("Changing to {} exploration", target));
        Ok(target)
    }

    fn push_log(&mut self, text: impl Into<String>) {
        self.log.push(LogEntry {
            at: self.clock.now(),
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, NaiveDate};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Wire {
        sent: RefCell<Vec<String>>,
        connects: Cell<usize>,
        terminations: Cell<usize>,
    }

    struct FakeTransport {
        wire: Rc<Wire>,
        fail_connect: bool,
    }

    impl StreamingTransport for FakeTransport {
        fn connect(&mut self) -> Result<(), TransportError> {
            self.wire.connects.set(self.wire.connects.get() + 1);
            if self.fail_connect {
                return Err(TransportError::Unavailable("no broker".into()));
            }
            Ok(())
        }

        fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
            self.wire.sent.borrow_mut().push(message.to_string());
            Ok(())
        }

        fn terminate(&mut self) {
            self.wire.terminations.set(self.wire.terminations.get() + 1);
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(15, 4, 5)
            .unwrap()
    }

    fn session() -> InteractionSession<FakeTransport, ManualClock> {
        InteractionSession::new(ManualClock::new(start()))
    }

    fn connected_session() -> (InteractionSession<FakeTransport, ManualClock>, Rc<Wire>) {
        let mut session = session();
        let wire = Rc::new(Wire::default());
        session
            .connect(FakeTransport {
                wire: Rc::clone(&wire),
                fail_connect: false,
            })
            .unwrap();
        session.handle_event(TransportEvent::ConnectionState(PeerState::Connected));
        (session, wire)
    }

    fn log_texts<T: StreamingTransport>(session: &InteractionSession<T, ManualClock>) -> Vec<String> {
        session.log().iter().map(|entry| entry.text.clone()).collect()
    }

    #[test]
    fn test_new_session() {
        let session = session();
        assert_eq!(session.phase(), ConnectionPhase::Idle);
        assert_eq!(session.mode(), Mode::Manual);
        assert!(!session.is_connected());
        assert!(!session.is_live());
        assert_eq!(session.log().len(), 1);
        assert_eq!(
            session.log()[0].to_string(),
            "3:04:05 PM - Opened remote control website"
        );
    }

    #[test]
    fn test_log_uses_injected_clock() {
        let clock = ManualClock::new(start());
        let mut session: InteractionSession<FakeTransport, &ManualClock> =
            InteractionSession::new(&clock);
        clock.advance(Duration::seconds(60));
        session.apply_payload(r#"{"type":"log","command":"Robot moved front"}"#);
        assert_eq!(
            session.log()[1].to_string(),
            "3:05:05 PM - Robot moved front"
        );
    }

    #[test]
    fn test_batch_counts_valid_and_invalid_lines() {
        let mut session = session();
        let payload = [
            r#"{"type":"log","command":"one"}"#,
            "{broken",
            r#"{"type":"objects","command":["cup"]}"#,
            "not json at all",
            r#"{"type":"log","command":"two"}"#,
        ]
        .join("\n");

        let before = session.log().len();
        let report = session.apply_payload(&payload);

        assert_eq!(report.applied, 3);
        assert_eq!(report.rejected, 2);
        assert_eq!(session.log().len(), before + 2);
        assert!(session.objects_found().contains("cup"));
        assert_eq!(session.last_message(), r#"{"type":"log","command":"two"}"#);
    }

    #[test]
    fn test_objects_union_and_nearest() {
        let mut session = session();
        session.apply_payload(r#"{"type":"mode","command":"autonomous"}"#);
        session.apply_payload(r#"{"type":"objects","command":["cup"]}"#);
        assert_eq!(session.objects_found().len(), 1);
        session.apply_payload(r#"{"type":"objects","command":["cup","box"]}"#);

        let found: Vec<_> = session.objects_found().iter().cloned().collect();
        assert_eq!(found, vec!["box".to_string(), "cup".to_string()]);
        assert_eq!(session.nearest_object_text(), "box, cup");
        assert_eq!(session.objects_found_text(), "box\ncup");

        session.apply_payload(r#"{"type":"objects","command":["chair"]}"#);
        assert_eq!(session.objects_found().len(), 3);
        assert_eq!(session.nearest_object_text(), "chair");
    }

    #[test]
    fn test_object_panels_in_manual_mode() {
        let mut session = session();
        session.apply_payload(r#"{"type":"objects","command":["cup"]}"#);
        assert_eq!(session.nearest_object_text(), NEAREST_OBJECT_MANUAL);
        assert_eq!(session.objects_found_text(), OBJECTS_FOUND_MANUAL);
    }

    #[test]
    fn test_nearest_object_default_in_autonomous_mode() {
        let mut session = session();
        session.apply(Inbound::Mode(Mode::Autonomous));
        assert_eq!(session.nearest_object_text(), NO_NEAREST_OBJECT);
        session.apply(Inbound::Objects(Vec::new()));
        assert_eq!(session.nearest_object_text(), NO_NEAREST_OBJECT);
    }

    #[test]
    fn test_autonomous_mode_message() {
        let mut session = session();
        let before = session.log().len();
        let report = session.apply_payload(r#"{"type":"mode","command":"autonomous"}"#);

        assert_eq!(session.mode(), Mode::Autonomous);
        assert_eq!(session.log().len(), before + 1);
        assert_eq!(
            session.log().last().unwrap().text,
            "Exploration mode switched to autonomous"
        );
        assert_eq!(
            report.notices,
            vec![Notice::Success(
                "Robot exploration mode set to autonomous".into()
            )]
        );

        // A repeated confirmation keeps the mode
        session.apply_payload(r#"{"type":"mode","command":"autonomous"}"#);
        assert_eq!(session.mode(), Mode::Autonomous);
    }

    #[test]
    fn test_unknown_type_leaves_state_alone() {
        let mut session = session();
        let report = session.apply_payload(r#"{"type":"battery","command":"87"}"#);
        assert_eq!(report.applied, 0);
        assert_eq!(report.rejected, 1);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.mode(), Mode::Manual);
    }

    #[test]
    fn test_held_key_sends_once() {
        let (mut session, wire) = connected_session();

        assert_eq!(session.press_key("w"), Ok(true));
        assert_eq!(session.press_key("w"), Ok(false));
        assert_eq!(session.press_key("W"), Ok(false));
        assert_eq!(wire.sent.borrow().len(), 1);

        assert!(session.release_key("w"));
        assert_eq!(session.press_key("w"), Ok(true));
        assert!(session.release_key("W"));
        assert_eq!(session.press(Direction::Front), Ok(true));

        assert_eq!(
            *wire.sent.borrow(),
            vec![r#"{"type":"motor","command":"front"}"#.to_string(); 3]
        );
    }

    #[test]
    fn test_simultaneous_keys_register_first_only() {
        let (mut session, wire) = connected_session();
        assert_eq!(session.press_key("D"), Ok(true));
        assert_eq!(session.press_key("a"), Ok(false));
        assert_eq!(session.held_direction(), Some(Direction::Right));
        assert!(!session.release_key("a"));
        assert_eq!(session.held_direction(), Some(Direction::Right));
        assert_eq!(wire.sent.borrow().len(), 1);
    }

    #[test]
    fn test_keyboard_ignored_while_typing() {
        let (mut session, wire) = connected_session();
        session.set_text_focus(true);
        assert_eq!(session.press_key("w"), Ok(false));
        // Buttons still work
        assert_eq!(session.press(Direction::Left), Ok(true));
        assert_eq!(wire.sent.borrow().len(), 1);
    }

    #[test]
    fn test_motor_suppressed_in_autonomous_mode() {
        let (mut session, wire) = connected_session();
        session.apply(Inbound::Mode(Mode::Autonomous));
        assert_eq!(session.press(Direction::Front), Ok(false));
        assert_eq!(session.press_key("s"), Ok(false));
        assert!(wire.sent.borrow().is_empty());
    }

    #[test]
    fn test_switching_to_autonomous_releases_held_key() {
        let (mut session, _wire) = connected_session();
        session.press(Direction::Back).unwrap();
        session.apply(Inbound::Mode(Mode::Autonomous));
        assert_eq!(session.held_direction(), None);
    }

    #[test]
    fn test_sends_refused_while_disconnected() {
        let mut session = session();
        let wire = Rc::new(Wire::default());
        session
            .connect(FakeTransport {
                wire: Rc::clone(&wire),
                fail_connect: false,
            })
            .unwrap();
        // Transport exists but the peer never connected

        assert_eq!(session.press(Direction::Front), Err(SendError::NotConnected));
        assert_eq!(
            session.send(&Command::Mode(Mode::Autonomous)),
            Err(SendError::NotConnected)
        );
        assert_eq!(session.toggle_mode(), Err(SendError::ModeToggleNotConnected));

        session.apply(Inbound::Mode(Mode::Autonomous));
        session.set_command_text("find the cup");
        assert_eq!(session.submit_find(), Err(SendError::NotConnected));
        assert_eq!(session.command_text(), "find the cup");

        assert!(wire.sent.borrow().is_empty());
        let notice: Notice = SendError::NotConnected.into();
        assert_eq!(
            notice,
            Notice::Error("Not connected to robot for command sending".into())
        );
    }

    #[test]
    fn test_sends_refused_without_transport() {
        let mut session = session();
        assert_eq!(session.press(Direction::Right), Err(SendError::NotConnected));
        assert_eq!(session.toggle_mode(), Err(SendError::ModeToggleNotConnected));
    }

    #[test]
    fn test_press_is_held_even_when_send_fails() {
        let mut session = session();
        assert_eq!(session.press(Direction::Front), Err(SendError::NotConnected));
        assert_eq!(session.press(Direction::Front), Ok(false));
    }

    #[test]
    fn test_find_requires_autonomous_mode() {
        let (mut session, wire) = connected_session();
        session.set_command_text("cup");
        assert_eq!(
            session.submit_find(),
            Err(SendError::WrongMode {
                required: Mode::Autonomous
            })
        );
        assert_eq!(
            SendError::WrongMode {
                required: Mode::Autonomous
            }
            .to_string(),
            "Switch to autonomous mode to use robot commands"
        );
        assert!(wire.sent.borrow().is_empty());
    }

    #[test]
    fn test_find_sends_and_clears_text() {
        let (mut session, wire) = connected_session();
        session.apply(Inbound::Mode(Mode::Autonomous));

        session.set_command_text("   ");
        assert_eq!(session.submit_find(), Err(SendError::EmptyCommand));

        session.set_command_text("go find the \"red\" cup");
        assert_eq!(session.submit_find(), Ok(()));
        assert_eq!(session.command_text(), "");
        assert_eq!(
            wire.sent.borrow().last().unwrap(),
            r#"{"type":"find","command":"go find the \"red\" cup"}"#
        );
    }

    #[test]
    fn test_toggle_mode_waits_for_confirmation() {
        let (mut session, wire) = connected_session();
        assert_eq!(session.toggle_mode(), Ok(Mode::Autonomous));
        assert_eq!(session.mode(), Mode::Manual);
        assert_eq!(
            wire.sent.borrow().last().unwrap(),
            r#"{"type":"mode","command":"autonomous"}"#
        );
        assert_eq!(
            session.log().last().unwrap().text,
            "Changing to autonomous exploration"
        );

        session.apply_payload(r#"{"type":"mode","command":"autonomous"}"#);
        assert_eq!(session.toggle_mode(), Ok(Mode::Manual));
        assert_eq!(
            session.log().last().unwrap().text,
            "Changing to manual exploration"
        );
    }

    #[test]
    fn test_connect_lifecycle_log() {
        let (mut session, wire) = connected_session();
        assert_eq!(session.phase(), ConnectionPhase::Connected);
        assert_eq!(wire.connects.get(), 1);

        // Stream arrival re-writes the connected phase: no second log line
        session.handle_event(TransportEvent::StreamArrived);
        assert!(session.is_live());

        assert_eq!(
            log_texts(&session),
            vec![
                "Opened remote control website",
                "Connecting to robot",
                "Robot connection established",
            ]
        );
        assert_eq!(session.display_status(), DisplayStatus::Connected);
    }

    #[test]
    fn test_peer_loss_times_out() {
        let (mut session, _wire) = connected_session();
        session.handle_event(TransportEvent::StreamArrived);
        session.handle_event(TransportEvent::ConnectionState(PeerState::Failed));

        assert_eq!(session.phase(), ConnectionPhase::TimedOut);
        assert!(!session.is_connected());
        assert!(!session.is_live());
        assert_eq!(session.log().last().unwrap().text, "Disconnected from robot");
        assert_eq!(session.display_status(), DisplayStatus::Disconnected);
    }

    #[test]
    fn test_timeout_event() {
        let mut session = session();
        let wire = Rc::new(Wire::default());
        session
            .connect(FakeTransport {
                wire,
                fail_connect: false,
            })
            .unwrap();
        session.handle_event(TransportEvent::TimedOut);
        assert_eq!(session.phase(), ConnectionPhase::TimedOut);
        assert_eq!(session.display_status(), DisplayStatus::Disconnected);
    }

    #[test]
    fn test_transport_that_fails_to_start() {
        let mut session = session();
        let wire = Rc::new(Wire::default());
        let result = session.connect(FakeTransport {
            wire: Rc::clone(&wire),
            fail_connect: true,
        });
        assert!(result.is_err());
        assert_eq!(session.phase(), ConnectionPhase::TimedOut);
        assert!(!session.has_transport());
        assert_eq!(wire.connects.get(), 1);
        assert_eq!(wire.terminations.get(), 1);
    }

    #[test]
    fn test_disconnect_from_idle_is_noop() {
        let mut session = session();
        assert!(!session.disconnect());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_disconnect_terminates_once() {
        let (mut session, wire) = connected_session();
        assert!(session.disconnect());
        assert_eq!(wire.terminations.get(), 1);
        assert_eq!(session.phase(), ConnectionPhase::Idle);
        assert!(!session.is_connected());
        assert_eq!(session.log().last().unwrap().text, "Disconnected from robot");

        assert!(!session.disconnect());
        assert_eq!(wire.terminations.get(), 1);
    }

    #[test]
    fn test_reconnect_replaces_transport_and_drops_stale_events() {
        let (mut session, first) = connected_session();
        let old_epoch = session.epoch();

        let second = Rc::new(Wire::default());
        let new_epoch = session
            .connect_with(|_| {
                Ok(FakeTransport {
                    wire: Rc::clone(&second),
                    fail_connect: false,
                })
            })
            .unwrap();
        assert_ne!(old_epoch, new_epoch);
        assert_eq!(first.terminations.get(), 1);
        assert_eq!(session.phase(), ConnectionPhase::Connecting);

        // The old transport reports it closed; that must not knock us over
        session.handle_event_from(
            old_epoch,
            TransportEvent::ConnectionState(PeerState::Closed),
        );
        assert_eq!(session.phase(), ConnectionPhase::Connecting);

        session.handle_event_from(
            new_epoch,
            TransportEvent::ConnectionState(PeerState::Connected),
        );
        assert_eq!(session.phase(), ConnectionPhase::Connected);
    }

    #[test]
    fn test_shutdown_terminates_quietly() {
        let (mut session, wire) = connected_session();
        let before = session.log().len();
        session.shutdown();
        assert_eq!(wire.terminations.get(), 1);
        assert_eq!(session.log().len(), before);
        assert!(!session.has_transport());
    }

    #[test]
    fn test_events_after_disconnect_are_dropped() {
        let (mut session, _wire) = connected_session();
        let epoch = session.epoch();
        session.disconnect();
        let before = session.log().len();
        session.handle_event_from(epoch, TransportEvent::ConnectionState(PeerState::Closed));
        assert_eq!(session.phase(), ConnectionPhase::Idle);
        assert_eq!(session.log().len(), before);
    }
}
