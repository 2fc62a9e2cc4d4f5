/// Longest username or room code accepted from user input, in characters.
pub const MAX_USER_INPUT_LENGTH: usize = 64;

/// Shown wherever a value is not known yet.
pub const UNKNOWN_SENTINEL: &str = "???";

/// Shown instead of a round number once the phase counter has passed the
/// number of players.
pub const GAME_ENDING_SENTINEL: &str = "(Game Ending...)";

/// Mime type used when an image file has no recognizable extension.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";
