//! API Route Handlers

pub mod health;
pub mod login;
pub mod stream;
