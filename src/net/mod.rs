//! Network layer subsystem.
//!
//! Binds the single TCP listener the relay serves on. Failing to bind is the
//! only error that stops the process.

pub mod listener;

pub use listener::{bind, ListenerError};
