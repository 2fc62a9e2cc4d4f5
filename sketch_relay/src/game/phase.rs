//! What this player is supposed to be doing right now.
//!
//! The authority reports a player's phase as a string discriminator with a
//! handful of optional fields. [`resolve`] turns that into [`Phase`], a closed
//! sum type, so every consumer matches exhaustively instead of probing for
//! field combinations.

use std::fmt;
use thiserror::Error;

use super::entities::{ImageRef, SubmissionKind};
use crate::net::messages::{RawStatus, StatusDescription};

/// Reasons a status payload could not be turned into a known phase.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedStatus {
    #[error("status has no description")]
    MissingDescription,
    #[error("unrecognized status description '{0}'")]
    UnknownDescription(String),
    #[error("{0} status is missing its prompt")]
    MissingPrompt(StatusDescription),
}

/// A player's phase. Exactly one is active at a time.
///
/// Usernames attached to a phase are whatever the authority sent. When it
/// sent none they stay `None`; the first phrase of a chain has no previous
/// submitter and nothing is made up in its place.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Phase {
    /// No status received yet, or the last one was unusable.
    #[default]
    Unknown,
    /// The room is open and this player writes the phrase that starts a chain.
    AwaitingInitialPhrase { next_username: Option<String> },
    /// This player received a drawing and must caption it.
    AwaitingPhrase {
        prompt: ImageRef,
        previous_username: Option<String>,
        next_username: Option<String>,
    },
    /// This player received a phrase and must draw it.
    AwaitingImage {
        prompt: String,
        previous_username: Option<String>,
        next_username: Option<String>,
    },
    /// Submitted; blocked on the other players.
    Waiting,
    /// Every chain is complete and the results can be fetched.
    GameOver,
}

fn required_prompt(raw: &RawStatus, description: StatusDescription) -> Result<String, MalformedStatus> {
    raw.prompt
        .clone()
        .ok_or(MalformedStatus::MissingPrompt(description))
}

/// Resolves a status payload, reporting why it couldn't be resolved.
pub fn try_resolve(raw: &RawStatus) -> Result<Phase, MalformedStatus> {
    let description = raw
        .description
        .as_deref()
        .filter(|description| !description.is_empty())
        .ok_or(MalformedStatus::MissingDescription)?;
    let description = StatusDescription::from_wire(description)
        .ok_or_else(|| MalformedStatus::UnknownDescription(description.to_string()))?;

    let previous_username = raw.previous_player_username.clone();
    let next_username = raw.next_player_username.clone();
    let phase = match description {
        StatusDescription::SubmitInitialPhrase => Phase::AwaitingInitialPhrase { next_username },
        StatusDescription::SubmitPhrase => Phase::AwaitingPhrase {
            prompt: ImageRef::new(required_prompt(raw, description)?),
            previous_username,
            next_username,
        },
        StatusDescription::SubmitImage => Phase::AwaitingImage {
            prompt: required_prompt(raw, description)?,
            previous_username,
            next_username,
        },
        StatusDescription::Wait => Phase::Waiting,
        StatusDescription::GameOver => Phase::GameOver,
    };
    Ok(phase)
}

/// Resolves a status payload. Anything unusable becomes [`Phase::Unknown`];
/// this never panics.
pub fn resolve(raw: &RawStatus) -> Phase {
    try_resolve(raw).unwrap_or_default()
}

impl Phase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }

    /// The kind of submission this phase asks for, if any.
    pub fn expected_submission(&self) -> Option<SubmissionKind> {
        match self {
            Self::AwaitingInitialPhrase { .. } | Self::AwaitingPhrase { .. } => {
                Some(SubmissionKind::Phrase)
            }
            Self::AwaitingImage { .. } => Some(SubmissionKind::Image),
            Self::Unknown | Self::Waiting | Self::GameOver => None,
        }
    }

    pub fn next_username(&self) -> Option<&str> {
        match self {
            Self::AwaitingInitialPhrase { next_username }
            | Self::AwaitingPhrase { next_username, .. }
            | Self::AwaitingImage { next_username, .. } => next_username.as_deref(),
            Self::Unknown | Self::Waiting | Self::GameOver => None,
        }
    }

    pub fn previous_username(&self) -> Option<&str> {
        match self {
            Self::AwaitingPhrase {
                previous_username, ..
            }
            | Self::AwaitingImage {
                previous_username, ..
            } => previous_username.as_deref(),
            Self::Unknown | Self::AwaitingInitialPhrase { .. } | Self::Waiting | Self::GameOver => {
                None
            }
        }
    }

    /// Title shown above the phase. Unknown degrades to a neutral waiting
    /// message rather than an error.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Unknown => "Waiting for the game...",
            Self::AwaitingInitialPhrase { .. } | Self::AwaitingPhrase { .. } => "Submit a Phrase",
            Self::AwaitingImage { .. } => "Submit an Image",
            Self::Waiting => "Waiting for the other players...",
            Self::GameOver => "Game Over!",
        }
    }

    /// Describes the prompt and who it came from.
    pub fn prompt_text(&self) -> Option<String> {
        match self {
            Self::AwaitingImage {
                prompt,
                previous_username,
                ..
            } => Some(match previous_username {
                Some(previous) => format!("Draw this phrase (from {previous}): \"{prompt}\""),
                None => format!("Draw this phrase: \"{prompt}\""),
            }),
            Self::AwaitingPhrase {
                previous_username, ..
            } => previous_username
                .as_ref()
                .map(|previous| format!("(This image drawn for you by {previous})")),
            Self::Unknown | Self::AwaitingInitialPhrase { .. } | Self::Waiting | Self::GameOver => {
                None
            }
        }
    }

    /// Label for the submission input, naming who receives it.
    pub fn input_label(&self) -> Option<String> {
        let label = match self {
            Self::AwaitingInitialPhrase { .. } => "Your common phrase, saying, or word",
            Self::AwaitingPhrase { .. } => "Your phrase describing this image",
            Self::AwaitingImage { .. } => "Your drawing",
            Self::Unknown | Self::Waiting | Self::GameOver => return None,
        };
        Some(match self.next_username() {
            Some(next) => format!("{label} (that will go to {next}):"),
            None => format!("{label}:"),
        })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Unknown => "unknown",
            Self::AwaitingInitialPhrase { .. } => "awaiting initial phrase",
            Self::AwaitingPhrase { .. } => "awaiting phrase",
            Self::AwaitingImage { .. } => "awaiting image",
            Self::Waiting => "waiting",
            Self::GameOver => "game over",
        };
        write!(f, "{repr}")
    }
}
