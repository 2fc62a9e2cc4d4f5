use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase discriminators the authority puts in a status `description`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatusDescription {
    SubmitInitialPhrase,
    SubmitPhrase,
    SubmitImage,
    Wait,
    GameOver,
}

impl StatusDescription {
    /// Parses a wire discriminator. Anything unrecognized, including the
    /// empty string, is `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "SUBMIT_INITIAL_PHRASE" => Some(Self::SubmitInitialPhrase),
            "SUBMIT_PHRASE" => Some(Self::SubmitPhrase),
            "SUBMIT_IMAGE" => Some(Self::SubmitImage),
            "WAIT" => Some(Self::Wait),
            "GAME_OVER" => Some(Self::GameOver),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::SubmitInitialPhrase => "SUBMIT_INITIAL_PHRASE",
            Self::SubmitPhrase => "SUBMIT_PHRASE",
            Self::SubmitImage => "SUBMIT_IMAGE",
            Self::Wait => "WAIT",
            Self::GameOver => "GAME_OVER",
        }
    }
}

impl fmt::Display for StatusDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// Body of `GET /game/{game}/player/{username}`.
///
/// Every field is optional so that a partial payload still decodes; the
/// phase resolver decides what a partial payload means.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawStatus {
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub previous_player_username: Option<String>,
    pub next_player_username: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RawPlayerStatus {
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawPlayer {
    pub username: String,
    #[serde(default)]
    pub status: Option<RawPlayerStatus>,
}

/// Body of `GET /game/{game}`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSummary {
    pub players: Vec<RawPlayer>,
    pub can_join: Option<bool>,
    pub can_start: Option<bool>,
    pub phase_number: Option<u32>,
}

/// Body of `POST /join`.
#[derive(Debug, Serialize)]
pub struct JoinRequest<'a> {
    pub username: &'a str,
    pub game: &'a str,
}

/// Body of `POST /phrase`.
#[derive(Debug, Serialize)]
pub struct PhraseRequest<'a> {
    pub username: &'a str,
    pub game: &'a str,
    pub phrase: &'a str,
}

/// Body of `POST /image`. `image` is a base64 data URL.
#[derive(Debug, Serialize)]
pub struct ImageRequest<'a> {
    pub username: &'a str,
    pub game: &'a str,
    pub image: &'a str,
}
