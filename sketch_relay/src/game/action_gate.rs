//! Decides whether a submission may be sent in the current phase and what
//! it carries.
//!
//! A rejection here is not a fault: nothing is sent and the presentation is
//! expected to have shown the affordance as disabled in the first place,
//! which is what [`ActionGate::available`] is for.

use thiserror::Error;

use super::{
    entities::{ImageData, RoomSummary, SubmissionKind},
    phase::Phase,
};

/// Reasons a submission is refused before any request is made.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ActionRejected {
    #[error("can't start yet: waiting for enough players to join")]
    CannotStartYet,
    #[error("select an image before submitting")]
    NoImageSelected,
    #[error("already submitted, waiting for the other players")]
    AlreadySubmitted,
    #[error("no {attempted} expected while {phase}")]
    NotAvailable {
        attempted: SubmissionKind,
        phase: String,
    },
}

/// The submission affordance to present for the current phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AvailableAction {
    /// Nothing to submit.
    #[default]
    None,
    SubmitPhrase { enabled: bool },
    SubmitImage { enabled: bool },
}

impl AvailableAction {
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::None => false,
            Self::SubmitPhrase { enabled } | Self::SubmitImage { enabled } => *enabled,
        }
    }
}

/// What the player is trying to submit. An image request without a file
/// means nothing was selected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionRequest {
    Phrase(String),
    Image(Option<ImageData>),
}

impl SubmissionRequest {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Self::Phrase(_) => SubmissionKind::Phrase,
            Self::Image(_) => SubmissionKind::Image,
        }
    }
}

/// An authorized submission, ready to send.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Submission {
    Phrase(String),
    Image(ImageData),
}

/// Submission rules over one phase/summary pair.
#[derive(Clone, Copy, Debug)]
pub struct ActionGate<'a> {
    phase: &'a Phase,
    summary: &'a RoomSummary,
    answered: bool,
}

impl<'a> ActionGate<'a> {
    pub fn new(phase: &'a Phase, summary: &'a RoomSummary) -> Self {
        Self {
            phase,
            summary,
            answered: false,
        }
    }

    /// Marks the phase as already answered by this client.
    #[must_use]
    pub fn answered(mut self, answered: bool) -> Self {
        self.answered = answered;
        self
    }

    pub fn available(&self) -> AvailableAction {
        let open = !self.answered;
        match self.phase {
            // The first phrase locks the roster, so it waits for the
            // authority to say the room can start.
            Phase::AwaitingInitialPhrase { .. } => AvailableAction::SubmitPhrase {
                enabled: open && self.summary.can_start == Some(true),
            },
            Phase::AwaitingPhrase { .. } => AvailableAction::SubmitPhrase { enabled: open },
            Phase::AwaitingImage { .. } => AvailableAction::SubmitImage { enabled: open },
            Phase::Unknown | Phase::Waiting | Phase::GameOver => AvailableAction::None,
        }
    }

    pub fn authorize(&self, request: SubmissionRequest) -> Result<Submission, ActionRejected> {
        let attempted = request.kind();
        if self.phase.expected_submission() != Some(attempted) {
            return Err(ActionRejected::NotAvailable {
                attempted,
                phase: self.phase.to_string(),
            });
        }
        if self.answered {
            return Err(ActionRejected::AlreadySubmitted);
        }

        match (self.phase, request) {
            (Phase::AwaitingInitialPhrase { .. }, SubmissionRequest::Phrase(_))
                if self.summary.can_start != Some(true) =>
            {
                Err(ActionRejected::CannotStartYet)
            }
            (_, SubmissionRequest::Phrase(phrase)) => Ok(Submission::Phrase(phrase)),
            (_, SubmissionRequest::Image(Some(image))) => Ok(Submission::Image(image)),
            (_, SubmissionRequest::Image(None)) => Err(ActionRejected::NoImageSelected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::ImageRef;

    fn summary(can_start: Option<bool>) -> RoomSummary {
        RoomSummary {
            can_start,
            ..Default::default()
        }
    }

    fn initial() -> Phase {
        Phase::AwaitingInitialPhrase {
            next_username: Some("Bob".to_string()),
        }
    }

    fn caption() -> Phase {
        Phase::AwaitingPhrase {
            prompt: ImageRef::new("data:image/png;base64,AAAA"),
            previous_username: Some("Alice".to_string()),
            next_username: Some("Bob".to_string()),
        }
    }

    fn drawing() -> Phase {
        Phase::AwaitingImage {
            prompt: "Punk rock".to_string(),
            previous_username: Some("Alice".to_string()),
            next_username: Some("Bob".to_string()),
        }
    }

    #[test]
    fn test_initial_phrase_needs_can_start() {
        let phase = initial();
        let closed = summary(Some(false));
        let gate = ActionGate::new(&phase, &closed);

        assert_eq!(
            gate.available(),
            AvailableAction::SubmitPhrase { enabled: false }
        );
        assert_eq!(
            gate.authorize(SubmissionRequest::Phrase("Bacteria".to_string())),
            Err(ActionRejected::CannotStartYet)
        );

        let unknown = summary(None);
        let gate = ActionGate::new(&phase, &unknown);
        assert!(!gate.available().is_enabled());
    }

    #[test]
    fn test_initial_phrase_allowed_once_startable() {
        let phase = initial();
        let ready = summary(Some(true));
        let gate = ActionGate::new(&phase, &ready);

        assert_eq!(
            gate.available(),
            AvailableAction::SubmitPhrase { enabled: true }
        );
        assert_eq!(
            gate.authorize(SubmissionRequest::Phrase("Bacteria".to_string())),
            Ok(Submission::Phrase("Bacteria".to_string()))
        );
    }

    #[test]
    fn test_caption_always_allowed() {
        let phase = caption();
        let closed = summary(Some(false));
        let gate = ActionGate::new(&phase, &closed);

        assert!(gate.available().is_enabled());
        assert_eq!(
            gate.authorize(SubmissionRequest::Phrase("Gameboy".to_string())),
            Ok(Submission::Phrase("Gameboy".to_string()))
        );
    }

    #[test]
    fn test_image_requires_selection() {
        let phase = drawing();
        let room = summary(None);
        let gate = ActionGate::new(&phase, &room);

        assert_eq!(gate.available(), AvailableAction::SubmitImage { enabled: true });
        assert_eq!(
            gate.authorize(SubmissionRequest::Image(None)),
            Err(ActionRejected::NoImageSelected)
        );

        let image = ImageData::encode("image/png", b"png");
        assert_eq!(
            gate.authorize(SubmissionRequest::Image(Some(image.clone()))),
            Ok(Submission::Image(image))
        );
    }

    #[test]
    fn test_wrong_kind_for_phase() {
        let phase = drawing();
        let room = summary(Some(true));
        let gate = ActionGate::new(&phase, &room);

        assert!(matches!(
            gate.authorize(SubmissionRequest::Phrase("hi".to_string())),
            Err(ActionRejected::NotAvailable {
                attempted: SubmissionKind::Phrase,
                ..
            })
        ));
    }

    #[test]
    fn test_nothing_available_outside_submission_phases() {
        let room = summary(Some(true));
        for phase in [Phase::Unknown, Phase::Waiting, Phase::GameOver] {
            let gate = ActionGate::new(&phase, &room);
            assert_eq!(gate.available(), AvailableAction::None);
            assert!(matches!(
                gate.authorize(SubmissionRequest::Phrase("hi".to_string())),
                Err(ActionRejected::NotAvailable { .. })
            ));
            assert!(matches!(
                gate.authorize(SubmissionRequest::Image(None)),
                Err(ActionRejected::NotAvailable { .. })
            ));
        }
    }

    #[test]
    fn test_answered_phase_is_disabled() {
        let phase = caption();
        let room = summary(Some(true));
        let gate = ActionGate::new(&phase, &room).answered(true);

        assert_eq!(
            gate.available(),
            AvailableAction::SubmitPhrase { enabled: false }
        );
        assert_eq!(
            gate.authorize(SubmissionRequest::Phrase("again".to_string())),
            Err(ActionRejected::AlreadySubmitted)
        );
    }

    #[test]
    fn test_rejection_messages() {
        let err = ActionRejected::NotAvailable {
            attempted: SubmissionKind::Image,
            phase: Phase::Waiting.to_string(),
        };
        assert_eq!(err.to_string(), "no image expected while waiting");
        assert!(ActionRejected::NoImageSelected.to_string().contains("image"));
    }
}
