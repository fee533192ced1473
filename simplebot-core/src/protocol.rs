//! Data Channel Message Protocol
//!
//! JSON envelopes exchanged with the robot over the reliable data channel.
//! Every envelope has the shape `{"type": ..., "command": ...}`. Inbound
//! payloads are newline-separated batches of envelopes; each line decodes on
//! its own so one bad line never affects its neighbours.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Robot exploration mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Directional driving from the page
    Manual,
    /// Robot explores on its own and accepts "find" requests
    Autonomous,
}

impl Mode {
    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Manual => "manual",
            Mode::Autonomous => "autonomous",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Manual => Mode::Autonomous,
            Mode::Autonomous => Mode::Manual,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Mode::Manual),
            "autonomous" => Ok(Mode::Autonomous),
            other => Err(ProtocolError::InvalidCommand {
                kind: "mode",
                reason: format!("unknown mode '{}'", other),
            }),
        }
    }
}

/// Driving direction for motor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Front,
    Back,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Front,
        Direction::Left,
        Direction::Right,
        Direction::Back,
    ];

    /// Wire name of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Front => "front",
            Direction::Back => "back",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Direction::Front),
            "back" => Ok(Direction::Back),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(ProtocolError::InvalidCommand {
                kind: "motor",
                reason: format!("unknown direction '{}'", other),
            }),
        }
    }
}

/// Messages sent from the page to the robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "command", rename_all = "snake_case")]
pub enum Command {
    /// Drive one step in a direction (manual mode)
    Motor(Direction),
    /// Ask the robot to look for something (autonomous mode)
    Find(String),
    /// Request a mode change
    Mode(Mode),
}

impl Command {
    /// Encode as the JSON text written to the data channel
    pub fn encode(&self) -> String {
        // Every variant is a string or unit enum, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Messages received from the robot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Names of objects currently detected
    Objects(Vec<String>),
    /// Human readable log line
    Log(String),
    /// Robot confirmed a mode change
    Mode(Mode),
}

impl Inbound {
    /// Wire type of the message
    pub fn kind(&self) -> &'static str {
        match self {
            Inbound::Objects(_) => "objects",
            Inbound::Log(_) => "log",
            Inbound::Mode(_) => "mode",
        }
    }
}

/// Reasons an inbound line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Not JSON, or not an object with a string `type`
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// Well-formed envelope with a type this page does not handle
    #[error("Unknown message type '{0}'")]
    UnknownType(String),

    /// Known type but the `command` has the wrong shape
    #[error("Invalid {kind} command: {reason}")]
    InvalidCommand { kind: &'static str, reason: String },
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    command: Option<Value>,
}

/// Decode a single envelope
pub fn decode_line(line: &str) -> Result<Inbound, ProtocolError> {
    let raw: RawEnvelope =
        serde_json::from_str(line).map_err(|e| ProtocolError::Malformed(e.to_string()))?;

    match raw.kind.as_str() {
        "objects" => {
            let names = match raw.command {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(name),
                        other => Err(ProtocolError::InvalidCommand {
                            kind: "objects",
                            reason: format!("expected object name, got {}", other),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => return Err(invalid("objects", "an array of names", other.as_ref())),
            };
            Ok(Inbound::Objects(names))
        }
        "log" => match raw.command {
            Some(Value::String(text)) => Ok(Inbound::Log(text)),
            other => Err(invalid("log", "a string", other.as_ref())),
        },
        "mode" => match raw.command {
            Some(Value::String(mode)) => Ok(Inbound::Mode(mode.parse()?)),
            other => Err(invalid("mode", "\"manual\" or \"autonomous\"", other.as_ref())),
        },
        other => Err(ProtocolError::UnknownType(other.to_string())),
    }
}

fn invalid(kind: &'static str, expected: &str, got: Option<&Value>) -> ProtocolError {
    let reason = match got {
        Some(value) => format!("expected {}, got {}", expected, value),
        None => format!("expected {}, command missing", expected),
    };
    ProtocolError::InvalidCommand { kind, reason }
}

/// Non-blank lines of an inbound payload, trimmed
pub fn batch_lines(payload: &str) -> impl Iterator<Item = &str> {
    payload.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Decode every non-blank line of a payload independently
pub fn decode_batch(payload: &str) -> Vec<Result<Inbound, ProtocolError>> {
    batch_lines(payload).map(decode_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_objects() {
        let msg = decode_line(r#"{"type": "objects", "command": ["cup", "box"]}"#).unwrap();
        assert_eq!(msg, Inbound::Objects(vec!["cup".into(), "box".into()]));
    }

    #[test]
    fn test_decode_log_and_mode() {
        assert_eq!(
            decode_line(r#"{"type":"log","command":"Robot moved front"}"#).unwrap(),
            Inbound::Log("Robot moved front".into())
        );
        assert_eq!(
            decode_line(r#"{"type":"mode","command":"autonomous"}"#).unwrap(),
            Inbound::Mode(Mode::Autonomous)
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let err = decode_line(r#"{"type":"telemetry","command":"x"}"#).unwrap_err();
        assert_eq!(err, ProtocolError::UnknownType("telemetry".into()));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            decode_line("{not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            decode_line("42"),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_command_shape() {
        // The robot occasionally misspells the command key
        let err = decode_line(r#"{"type":"log","commad":"LLM response"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCommand { kind: "log", .. }));

        let err = decode_line(r#"{"type":"objects","command":"cup"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCommand { kind: "objects", .. }));

        let err = decode_line(r#"{"type":"mode","command":"follow"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCommand { kind: "mode", .. }));
    }

    #[test]
    fn test_decode_batch_skips_blank_lines() {
        let payload = "{\"type\":\"log\",\"command\":\"a\"}\n\n  \n{oops\r\n{\"type\":\"log\",\"command\":\"b\"}\n";
        let results = decode_batch(payload);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2], Ok(Inbound::Log("b".into())));
    }

    #[test]
    fn test_encode_commands() {
        assert_eq!(
            Command::Motor(Direction::Front).encode(),
            r#"{"type":"motor","command":"front"}"#
        );
        assert_eq!(
            Command::Mode(Mode::Manual).encode(),
            r#"{"type":"mode","command":"manual"}"#
        );
    }

    #[test]
    fn test_encode_find_escapes_text() {
        let json = Command::Find(r#"the "red" cup"#.into()).encode();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "find");
        assert_eq!(value["command"], r#"the "red" cup"#);
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(Mode::Manual.toggled(), Mode::Autonomous);
        assert_eq!(Mode::Autonomous.toggled(), Mode::Manual);
    }
}
