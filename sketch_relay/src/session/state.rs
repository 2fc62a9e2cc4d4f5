use log::{debug, info, warn};
use std::fmt;

use super::errors::{SessionError, SessionResult};
use crate::{
    game::{
        action_gate::{ActionGate, AvailableAction},
        entities::{Identity, ResultChain, RoomSummary},
        phase::{Phase, try_resolve},
    },
    net::{
        errors::{ApiError, ApiResult},
        messages::{RawStatus, RawSummary},
    },
};

/// Where a session is in its single pass from joining to the reveal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Stage {
    #[default]
    PreJoin,
    Joining,
    Active,
    Ended,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreJoin => "pre-join",
            Self::Joining => "joining",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        write!(f, "{repr}")
    }
}

fn log_poll_failure(resource: &str, error: &ApiError) {
    if error.is_transient() {
        debug!("{resource} poll failed, keeping last value: {error}");
    } else {
        warn!("{resource} poll failed, keeping last value: {error}");
    }
}

/// Everything the client knows about its session.
///
/// Transitions consume the state and hand back its successor. Phase and
/// summary are only ever replaced whole, and a failed poll hands back the
/// state it was given.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    stage: Stage,
    identity: Option<Identity>,
    phase: Phase,
    summary: RoomSummary,
    /// Phase this client already submitted for. Cleared as soon as the
    /// authority reports any other phase.
    answered: Option<Phase>,
    results: Option<Vec<ResultChain>>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn summary(&self) -> &RoomSummary {
        &self.summary
    }

    pub fn results(&self) -> Option<&[ResultChain]> {
        self.results.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.answered.as_ref() == Some(&self.phase)
    }

    /// Submission rules for the current phase and summary.
    pub fn gate(&self) -> ActionGate<'_> {
        ActionGate::new(&self.phase, &self.summary).answered(self.is_answered())
    }

    /// `PreJoin -> Joining`, recording who we are.
    pub fn begin_join(self, identity: Identity) -> SessionResult<Self> {
        match (self.stage, &self.identity) {
            (Stage::PreJoin, None) => {
                info!("joining room {} as {}", identity.room_code, identity.username);
                Ok(Self {
                    stage: Stage::Joining,
                    identity: Some(identity),
                    ..self
                })
            }
            (_, Some(joined)) => Err(SessionError::AlreadyJoined(joined.room_code.to_string())),
            (_, None) => Err(SessionError::AlreadyJoined(identity.room_code.to_string())),
        }
    }

    /// `Joining -> Active`, whatever the first fetch returned. Goes straight
    /// to `Ended` if the room was already finished.
    #[must_use]
    pub fn activate(self) -> Self {
        match self.stage {
            Stage::Joining if self.phase.is_game_over() => Self {
                stage: Stage::Ended,
                ..self
            },
            Stage::Joining => Self {
                stage: Stage::Active,
                ..self
            },
            _ => self,
        }
    }

    /// Applies a player-status poll.
    #[must_use]
    pub fn apply_status(self, outcome: ApiResult<RawStatus>) -> Self {
        if self.identity.is_none() || self.stage == Stage::Ended {
            return self;
        }
        let raw = match outcome {
            Ok(raw) => raw,
            Err(error) => {
                log_poll_failure("status", &error);
                return self;
            }
        };
        match try_resolve(&raw) {
            Ok(phase) => self.replace_phase(phase),
            Err(error) => {
                warn!("ignoring status payload: {error}");
                self
            }
        }
    }

    fn replace_phase(self, phase: Phase) -> Self {
        if phase != self.phase {
            debug!("phase changed: {} -> {phase}", self.phase);
        }
        let answered = self.answered.filter(|answered| *answered == phase);
        let stage = match self.stage {
            Stage::Active if phase.is_game_over() => {
                info!("game over, stopping polls");
                Stage::Ended
            }
            stage => stage,
        };
        Self {
            stage,
            phase,
            answered,
            ..self
        }
    }

    /// Applies a room-summary poll.
    #[must_use]
    pub fn apply_summary(self, outcome: ApiResult<RawSummary>) -> Self {
        if self.identity.is_none() {
            return self;
        }
        match outcome {
            Ok(raw) => Self {
                summary: RoomSummary::from(raw),
                ..self
            },
            Err(error) => {
                log_poll_failure("summary", &error);
                self
            }
        }
    }

    /// Reserves `answered` for a submission about to be sent, unless the
    /// phase has moved on in the meantime. While reserved the gate refuses
    /// further submissions for that phase.
    #[must_use]
    pub fn begin_submission(self, answered: Phase) -> Self {
        if self.phase == answered {
            Self {
                answered: Some(answered),
                ..self
            }
        } else {
            self
        }
    }

    /// Releases a reservation whose submission never reached the authority.
    #[must_use]
    pub fn abort_submission(self, answered: &Phase) -> Self {
        if self.answered.as_ref() == Some(answered) {
            Self {
                answered: None,
                ..self
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn with_results(self, results: Vec<ResultChain>) -> Self {
        Self {
            results: Some(results),
            ..self
        }
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            stage: self.stage,
            identity: self.identity.clone(),
            phase: self.phase.clone(),
            summary: self.summary.clone(),
            available_action: self.gate().available(),
        }
    }
}

/// Latest known values, read-only.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SessionView {
    pub stage: Stage,
    pub identity: Option<Identity>,
    pub phase: Phase,
    pub summary: RoomSummary,
    pub available_action: AvailableAction,
}

impl SessionView {
    /// Roster lines with the local player marked.
    pub fn player_rows(&self) -> Vec<String> {
        self.summary
            .player_rows(self.identity.as_ref().map(|identity| &identity.username))
    }
}
