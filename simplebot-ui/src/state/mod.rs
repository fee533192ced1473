//! State Management
//!
//! Global application state and the interaction page session.

pub mod global;
pub mod interaction;

pub use global::{provide_global_state, GlobalState};
pub use interaction::InteractionState;
