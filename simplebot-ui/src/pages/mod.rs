//! Pages
//!
//! Top-level page components for each route.

pub mod home;
pub mod interaction;
pub mod login;

pub use home::Home;
pub use interaction::Interaction;
pub use login::Login;
