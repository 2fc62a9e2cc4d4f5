//! # Sketch Relay
//!
//! Client-side phase synchronization for a write-and-draw relay party game.
//!
//! Players join a room and take turns writing a phrase or drawing an image.
//! Every submission is handed to the next player as a prompt until each chain
//! has gone all the way around the room, after which every chain is revealed.
//!
//! The remote game authority decides what each player does next. This crate
//! polls that authority, turns its loosely shaped payloads into a closed
//! [`Phase`] type, derives display values from the room summary, and decides
//! which submission a player may send right now.
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, phase resolution, summary labels and the action gate
//! - [`net`]: Wire messages, API errors and the [`GameApi`] seam
//! - [`session`]: The session state machine and its polling tasks
//!
//! ## Example
//!
//! ```
//! use sketch_relay::{net::messages::RawStatus, resolve, Phase};
//!
//! let raw: RawStatus = serde_json::from_str(r#"{"description": "WAIT"}"#).unwrap();
//! assert_eq!(resolve(&raw), Phase::Waiting);
//! ```

/// Relay game entities, phase resolution and derived display values.
pub mod game;
pub use game::{
    action_gate::{ActionGate, ActionRejected, AvailableAction, Submission, SubmissionRequest},
    constants,
    entities::{
        ChainEntry, Identity, IdentityError, ImageData, ImageError, ImageRef, PlayerEntry,
        ResultChain, RoomCode, RoomSummary, SubmissionKind, Username,
    },
    phase::{Phase, resolve},
    summary,
};

/// Wire messages and the game authority API seam.
pub mod net;
pub use net::{
    api::GameApi,
    errors::{ApiError, ApiResult},
};

/// Session state machine and polling.
pub mod session;
pub use session::{
    PollConfig, Session, SessionError, SessionResult, SessionState, SessionView, Stage,
};
