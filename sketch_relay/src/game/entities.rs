use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use thiserror::Error;

use super::constants::{DEFAULT_IMAGE_MIME, MAX_USER_INPUT_LENGTH};
use crate::net::messages::RawSummary;

/// Errors for identity values typed in by the player.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum IdentityError {
    #[error("username can't be empty")]
    EmptyUsername,
    #[error("room code can't be empty")]
    EmptyRoomCode,
    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Errors for image payloads.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ImageError {
    #[error("image is not a data URL")]
    NotADataUrl,
    #[error("image data URL is missing a mime type")]
    MissingMime,
    #[error("image data URL is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 image payload: {0}")]
    InvalidBase64(String),
}

/// Trims surrounding whitespace. Over-long input is refused, never cut.
fn clean_input(
    s: &str,
    field: &'static str,
    empty: IdentityError,
) -> Result<String, IdentityError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > MAX_USER_INPUT_LENGTH {
        return Err(IdentityError::TooLong {
            field,
            max: MAX_USER_INPUT_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// A player's name. Never empty.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Result<Self, IdentityError> {
        clean_input(s, "username", IdentityError::EmptyUsername).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The code players share to end up in the same room. Never empty.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(s: &str) -> Result<Self, IdentityError> {
        clean_input(s, "room code", IdentityError::EmptyRoomCode).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who this client is and which room it plays in. Set once at join.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Identity {
    pub username: Username,
    pub room_code: RoomCode,
}

impl Identity {
    pub fn new(username: &str, room_code: &str) -> Result<Self, IdentityError> {
        Ok(Self {
            username: Username::new(username)?,
            room_code: RoomCode::new(room_code)?,
        })
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.room_code)
    }
}

/// A drawing handed out by the authority as a prompt. Usually a data URL,
/// but it is displayed as-is and never decoded here.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data URLs are far too long to print.
        if self.is_data_url() {
            let len = self.0.len();
            write!(f, "<inline image, {len} bytes>")
        } else {
            self.0.fmt(f)
        }
    }
}

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

fn split_data_url(data_url: &str) -> Result<(&str, &str), ImageError> {
    let rest = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(ImageError::NotADataUrl)?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or(ImageError::NotBase64)?;
    if mime.is_empty() {
        return Err(ImageError::MissingMime);
    }
    Ok((mime, payload))
}

/// An image selected for submission, held as a base64 data URL
/// (`data:<mime>;base64,<payload>`).
///
/// The bytes are not inspected; whether they really are an image is up to
/// the game authority.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageData {
    data_url: String,
    mime_len: usize,
}

impl ImageData {
    /// Encodes raw file bytes.
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let mime = if mime.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            mime
        };
        Self {
            data_url: format!("{DATA_URL_PREFIX}{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes)),
            mime_len: mime.len(),
        }
    }

    /// Wraps an already encoded data URL after checking its header.
    pub fn from_data_url(data_url: &str) -> Result<Self, ImageError> {
        let (mime, _) = split_data_url(data_url)?;
        Ok(Self {
            mime_len: mime.len(),
            data_url: data_url.to_string(),
        })
    }

    /// Picks a mime type from a file extension, falling back to PNG.
    pub fn mime_for_path(path: &Path) -> &'static str {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("svg") => "image/svg+xml",
            _ => DEFAULT_IMAGE_MIME,
        }
    }

    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    pub fn mime_type(&self) -> &str {
        let start = DATA_URL_PREFIX.len();
        &self.data_url[start..start + self.mime_len]
    }

    /// Decodes the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let payload_start = DATA_URL_PREFIX.len() + self.mime_len + BASE64_MARKER.len();
        STANDARD
            .decode(&self.data_url[payload_start..])
            .map_err(|e| ImageError::InvalidBase64(e.to_string()))
    }
}

/// One row of the room roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerEntry {
    pub username: String,
    /// Raw phase discriminator the authority reports for this player.
    pub description: Option<String>,
}

/// Aggregate room status.
///
/// `Default` is the summary before the first successful fetch: no players and
/// every flag unknown.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoomSummary {
    /// Display order is the order the authority lists players in.
    pub players: Vec<PlayerEntry>,
    pub can_join: Option<bool>,
    pub can_start: Option<bool>,
    /// 1-indexed. Exceeds the player count right before the game ends.
    pub phase_number: Option<u32>,
}

impl RoomSummary {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn has_player(&self, username: &Username) -> bool {
        self.players
            .iter()
            .any(|player| player.username == username.as_str())
    }
}

impl From<RawSummary> for RoomSummary {
    fn from(raw: RawSummary) -> Self {
        Self {
            players: raw
                .players
                .into_iter()
                .map(|player| PlayerEntry {
                    username: player.username,
                    description: player.status.and_then(|status| status.description),
                })
                .collect(),
            can_join: raw.can_join,
            can_start: raw.can_start,
            phase_number: raw.phase_number,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SubmissionKind {
    Phrase,
    Image,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Phrase => "phrase",
            Self::Image => "image",
        };
        write!(f, "{repr}")
    }
}

/// A finished chain: the originator's phrase followed by every drawing and
/// caption it turned into.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultChain {
    pub originator: String,
    #[serde(default)]
    pub submissions: Vec<String>,
}

/// A chain element prepared for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainEntry<'a> {
    pub kind: SubmissionKind,
    pub content: &'a str,
    /// False only for the final element, which isn't followed by
    /// "Leading to...".
    pub leads_on: bool,
}

impl ResultChain {
    /// Submissions alternate phrase, image, phrase... starting with a phrase.
    pub fn entries(&self) -> impl Iterator<Item = ChainEntry<'_>> {
        let last = self.submissions.len().saturating_sub(1);
        self.submissions
            .iter()
            .enumerate()
            .map(move |(idx, content)| ChainEntry {
                kind: if idx % 2 == 0 {
                    SubmissionKind::Phrase
                } else {
                    SubmissionKind::Image
                },
                content,
                leads_on: idx < last,
            })
    }
}
