//! Boundary with the remote game authority.
//!
//! The authority speaks JSON over HTTP. This module holds the wire shapes,
//! the error taxonomy for talking to it, and the [`api::GameApi`] trait the
//! session drives. Transport lives behind that trait so the session can be
//! exercised without a server.

/// The game authority API seam.
pub mod api;

/// Errors returned by the game authority API.
pub mod errors;

/// Request and response bodies as they appear on the wire.
pub mod messages;
