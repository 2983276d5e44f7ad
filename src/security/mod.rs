//! Security subsystem.
//!
//! The relay performs no authentication and imposes no target allow-list;
//! the only policy it applies is the cross-origin one in `cors.rs`.

pub mod cors;

pub use cors::cors_layer;
