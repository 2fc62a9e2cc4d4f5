//! Relay game logic that runs on the client.
//!
//! Everything in here is pure: it turns payloads already fetched from the
//! game authority into typed values and never touches the network.

pub mod action_gate;
pub mod constants;
pub mod entities;
pub mod phase;
pub mod summary;
