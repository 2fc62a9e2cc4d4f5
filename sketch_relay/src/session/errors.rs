//! Session error types.

use thiserror::Error;

use crate::{
    game::{action_gate::ActionRejected, entities::IdentityError},
    net::errors::ApiError,
};

/// Errors surfaced by player-initiated session operations
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SessionError {
    /// Username or room code was unusable
    #[error("Invalid identity: {0}")]
    Identity(#[from] IdentityError),

    /// A session joins exactly once
    #[error("Already joined room {0}")]
    AlreadyJoined(String),

    /// Operation needs a joined session
    #[error("Not in a room yet")]
    NotJoined,

    /// The action gate refused the submission; nothing was sent
    #[error("Action rejected: {0}")]
    Rejected(#[from] ActionRejected),

    /// Results exist only once the game is over
    #[error("Results aren't available until the game is over")]
    ResultsUnavailable,

    /// Restart only clears a finished game
    #[error("The game is still in progress")]
    GameInProgress,

    /// The request reached the API layer and failed there
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
