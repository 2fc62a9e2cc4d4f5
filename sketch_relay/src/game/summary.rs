//! Display values derived from the room summary.

use super::{
    constants::{GAME_ENDING_SENTINEL, UNKNOWN_SENTINEL},
    entities::{PlayerEntry, RoomSummary, Username},
};
use crate::net::messages::StatusDescription;

/// Room-level status phrase. `None` means the summary hasn't been fetched
/// yet, which is distinct from either answer.
pub fn joinability_label(can_join: Option<bool>) -> &'static str {
    match can_join {
        None => UNKNOWN_SENTINEL,
        Some(true) => "Waiting for Players",
        Some(false) => "In Progress",
    }
}

/// Round counter, e.g. `"2 of 4"`.
///
/// While players can still join the roster isn't fixed, so the total is
/// shown as unknown. Once it is locked, a phase number past the player count
/// means the game is about to end.
///
/// A summary without `can_join` says nothing about the roster, so it is read
/// as still open: the total stays unknown and the game is never reported as
/// ending. Only an explicit `Some(false)` uses the player count.
pub fn round_label(phase_number: Option<u32>, player_count: usize, can_join: Option<bool>) -> String {
    let Some(phase_number) = phase_number else {
        return UNKNOWN_SENTINEL.to_string();
    };
    match can_join {
        Some(false) if phase_number as usize > player_count => GAME_ENDING_SENTINEL.to_string(),
        Some(false) => format!("{phase_number} of {player_count}"),
        Some(true) | None => format!("{phase_number} of {UNKNOWN_SENTINEL}"),
    }
}

/// Status word for one row of the roster. Unrecognized discriminators
/// render as nothing.
pub fn player_status_label(description: Option<&str>) -> &'static str {
    match description.and_then(StatusDescription::from_wire) {
        Some(StatusDescription::SubmitInitialPhrase | StatusDescription::SubmitPhrase) => {
            "Writing..."
        }
        Some(StatusDescription::SubmitImage) => "Drawing...",
        Some(StatusDescription::Wait) => "Done for Now...",
        Some(StatusDescription::GameOver) | None => "",
    }
}

/// Whether to warn that the first submission locks the roster. Only true
/// while the room is still open.
pub fn start_warning_visible(can_join: Option<bool>) -> bool {
    can_join == Some(true)
}

pub const START_WARNING: &str = "Warning: The first submission locks the game's player list. \
Make sure all players are in before submitting!";

/// One roster line, marking the local player.
pub fn player_row(player: &PlayerEntry, me: Option<&Username>) -> String {
    let you = me.is_some_and(|me| me.as_str() == player.username);
    let status = player_status_label(player.description.as_deref());
    if you {
        format!("{} (YOU): {status}", player.username)
    } else {
        format!("{}: {status}", player.username)
    }
}

impl RoomSummary {
    pub fn joinability_label(&self) -> &'static str {
        joinability_label(self.can_join)
    }

    pub fn round_label(&self) -> String {
        round_label(self.phase_number, self.player_count(), self.can_join)
    }

    pub fn start_warning_visible(&self) -> bool {
        start_warning_visible(self.can_join)
    }

    pub fn player_rows(&self, me: Option<&Username>) -> Vec<String> {
        self.players
            .iter()
            .map(|player| player_row(player, me))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(username: &str, description: Option<&str>) -> PlayerEntry {
        PlayerEntry {
            username: username.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_joinability_label() {
        assert_eq!(joinability_label(Some(true)), "Waiting for Players");
        assert_eq!(joinability_label(Some(false)), "In Progress");
        assert_eq!(joinability_label(None), "???");
    }

    #[test]
    fn test_round_label_locked_roster() {
        assert_eq!(round_label(Some(1), 2, Some(false)), "1 of 2");
        assert_eq!(round_label(Some(2), 2, Some(false)), "2 of 2");
    }

    #[test]
    fn test_round_label_game_ending() {
        assert_eq!(round_label(Some(5), 2, Some(false)), "(Game Ending...)");
        assert_eq!(round_label(Some(3), 2, Some(false)), "(Game Ending...)");
    }

    #[test]
    fn test_round_label_open_roster() {
        assert_eq!(round_label(Some(1), 0, Some(true)), "1 of ???");
        assert_eq!(round_label(Some(1), 3, Some(true)), "1 of ???");
        assert_eq!(round_label(Some(4), 3, Some(true)), "4 of ???");
    }

    #[test]
    fn test_round_label_absent_joinability_reads_as_open() {
        assert_eq!(round_label(Some(1), 0, None), "1 of ???");
        assert_eq!(round_label(Some(2), 3, None), "2 of ???");
        // No sentinel without an explicit lock, even past the player count.
        assert_eq!(round_label(Some(5), 2, None), "5 of ???");
    }

    #[test]
    fn test_round_label_unknown_phase_number() {
        assert_eq!(round_label(None, 4, Some(false)), "???");
        assert_eq!(round_label(None, 0, None), "???");
    }

    #[test]
    fn test_player_status_label() {
        assert_eq!(player_status_label(Some("SUBMIT_PHRASE")), "Writing...");
        assert_eq!(
            player_status_label(Some("SUBMIT_INITIAL_PHRASE")),
            "Writing..."
        );
        assert_eq!(player_status_label(Some("SUBMIT_IMAGE")), "Drawing...");
        assert_eq!(player_status_label(Some("WAIT")), "Done for Now...");
        assert_eq!(player_status_label(Some("GAME_OVER")), "");
        assert_eq!(player_status_label(Some("???")), "");
        assert_eq!(player_status_label(None), "");
    }

    #[test]
    fn test_start_warning_visible() {
        assert!(start_warning_visible(Some(true)));
        assert!(!start_warning_visible(Some(false)));
        assert!(!start_warning_visible(None));
    }

    #[test]
    fn test_player_rows_mark_local_player() {
        let summary = RoomSummary {
            players: vec![
                player("Alice", Some("SUBMIT_IMAGE")),
                player("Billy", Some("WAIT")),
                player("Carol", Some("DANCING")),
            ],
            can_join: Some(false),
            can_start: Some(true),
            phase_number: Some(2),
        };
        let me = Username::new("Billy").unwrap();

        assert_eq!(
            summary.player_rows(Some(&me)),
            vec![
                "Alice: Drawing...".to_string(),
                "Billy (YOU): Done for Now...".to_string(),
                "Carol: ".to_string(),
            ]
        );
        assert_eq!(summary.round_label(), "2 of 3");
        assert_eq!(summary.joinability_label(), "In Progress");
        assert!(!summary.start_warning_visible());
    }

    #[test]
    fn test_unfetched_summary_labels() {
        let summary = RoomSummary::default();
        assert_eq!(summary.joinability_label(), "???");
        assert_eq!(summary.round_label(), "???");
        assert!(summary.player_rows(None).is_empty());
    }
}
