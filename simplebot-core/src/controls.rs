//! Drive Controls
//!
//! Keyboard and on-screen button handling for manual driving. Only one
//! direction can be held at a time; holding a key never repeats the motor
//! command.

use crate::protocol::Direction;

/// Map a `KeyboardEvent.key` value to a direction
///
/// `w`/`a`/`s`/`d` in either case.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "w" | "W" => Some(Direction::Front),
        "a" | "A" => Some(Direction::Left),
        "s" | "S" => Some(Direction::Back),
        "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// On-screen label of the button for a direction
pub fn key_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Front => "W",
        Direction::Left => "A",
        Direction::Right => "D",
        Direction::Back => "S",
    }
}

/// Tracks the single held direction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveControls {
    held: Option<Direction>,
}

impl DriveControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press. Returns `true` when this press should send a
    /// motor command, `false` while any direction is already held.
    pub fn press(&mut self, direction: Direction) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(direction);
        true
    }

    /// Register a release. Releasing anything but the held direction is
    /// ignored. Returns `true` when the held direction was released.
    pub fn release(&mut self, direction: Direction) -> bool {
        if self.held == Some(direction) {
            self.held = None;
            true
        } else {
            false
        }
    }

    /// Drop any held direction
    pub fn release_all(&mut self) {
        self.held = None;
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.held == Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        for (lower, upper, dir) in [
            ("w", "W", Direction::Front),
            ("a", "A", Direction::Left),
            ("s", "S", Direction::Back),
            ("d", "D", Direction::Right),
        ] {
            assert_eq!(direction_for_key(lower), Some(dir));
            assert_eq!(direction_for_key(upper), Some(dir));
        }
        assert_eq!(direction_for_key("ArrowUp"), None);
        assert_eq!(direction_for_key("q"), None);
    }

    #[test]
    fn test_hold_suppresses_repeats() {
        let mut controls = DriveControls::new();
        assert!(controls.press(Direction::Front));
        // Key auto-repeat
        assert!(!controls.press(Direction::Front));
        assert!(!controls.press(Direction::Front));
        assert!(controls.release(Direction::Front));
        assert!(controls.press(Direction::Front));
    }

    #[test]
    fn test_second_key_ignored_while_held() {
        let mut controls = DriveControls::new();
        assert!(controls.press(Direction::Left));
        assert!(!controls.press(Direction::Right));
        // Releasing the ignored key leaves the held one in place
        assert!(!controls.release(Direction::Right));
        assert_eq!(controls.held(), Some(Direction::Left));
        assert!(controls.release(Direction::Left));
        assert_eq!(controls.held(), None);
    }

    #[test]
    fn test_release_all() {
        let mut controls = DriveControls::new();
        controls.press(Direction::Back);
        controls.release_all();
        assert!(!controls.is_pressed(Direction::Back));
        assert!(controls.press(Direction::Right));
    }
}
