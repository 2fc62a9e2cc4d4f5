//! Plain-text rendering of the session view and the final reveal.

use sketch_relay::{
    AvailableAction, ImageRef, Phase, ResultChain, SessionView, SubmissionKind,
    summary::START_WARNING,
};

const WIDTH: usize = 72;

fn heavy_rule() -> String {
    "═".repeat(WIDTH)
}

fn light_rule() -> String {
    "─".repeat(WIDTH)
}

/// What the player can do right now, or why they can't.
fn action_hint(view: &SessionView) -> Option<String> {
    let hint = match view.available_action {
        AvailableAction::SubmitPhrase { enabled: true } => "> phrase <text>",
        AvailableAction::SubmitImage { enabled: true } => "> image <path>",
        AvailableAction::SubmitPhrase { enabled: false }
            if matches!(view.phase, Phase::AwaitingInitialPhrase { .. })
                && view.summary.can_start != Some(true) =>
        {
            "Can't start yet: waiting for enough players to join..."
        }
        AvailableAction::SubmitPhrase { enabled: false }
        | AvailableAction::SubmitImage { enabled: false } => {
            "Submitted! Waiting for the other players..."
        }
        AvailableAction::None if view.phase.is_game_over() => {
            "Type 'results' to see how every chain turned out."
        }
        AvailableAction::None => return None,
    };
    Some(hint.to_string())
}

/// Renders the whole game screen for one view.
pub fn render_view(view: &SessionView) -> String {
    let mut lines = vec![heavy_rule(), "SKETCH RELAY".to_string(), heavy_rule()];

    match &view.identity {
        Some(identity) => {
            lines.push(format!("Your Name: {}", identity.username));
            lines.push(format!("This Room's Code: {}", identity.room_code));
        }
        None => lines.push("Not in a room yet".to_string()),
    }
    lines.push(format!(
        "Game Status: {}",
        view.summary.joinability_label()
    ));
    lines.push(format!("Round: {}", view.summary.round_label()));

    lines.push(light_rule());
    lines.push("Players:".to_string());
    let rows = view.player_rows();
    if rows.is_empty() {
        lines.push("  (none yet)".to_string());
    }
    lines.extend(rows.into_iter().map(|row| format!("  {row}")));

    lines.push(light_rule());
    lines.push(view.phase.headline().to_string());
    if let Phase::AwaitingPhrase { prompt, .. } = &view.phase {
        lines.push(format!("Prompt: {prompt}"));
    }
    lines.extend(view.phase.prompt_text());
    lines.extend(view.phase.input_label());
    lines.extend(action_hint(view).map(|hint| format!("  {hint}")));

    if view.summary.start_warning_visible() {
        lines.push(String::new());
        lines.push(START_WARNING.to_string());
    }
    lines.push(heavy_rule());

    lines.join("\n")
}

/// Renders every finished chain, each element followed by "Leading to..."
/// except the last.
pub fn render_results(chains: &[ResultChain]) -> String {
    let mut lines = vec![light_rule(), "Results".to_string(), light_rule()];
    if chains.is_empty() {
        lines.push("No chains to show.".to_string());
    }

    for chain in chains {
        lines.push(format!("Player {} originally submitted:", chain.originator));
        for entry in chain.entries() {
            let content = match entry.kind {
                SubmissionKind::Phrase => format!("\"{}\"", entry.content),
                SubmissionKind::Image => format!("[{}]", ImageRef::new(entry.content)),
            };
            lines.push(format!("  {content}"));
            if entry.leads_on {
                lines.push("  Leading to...".to_string());
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketch_relay::{Identity, PlayerEntry, RoomSummary, Stage};

    fn view(phase: Phase, summary: RoomSummary, available_action: AvailableAction) -> SessionView {
        SessionView {
            stage: Stage::Active,
            identity: Some(Identity::new("Billy", "TheClubhouse").unwrap()),
            phase,
            summary,
            available_action,
        }
    }

    fn summary(can_join: Option<bool>, can_start: Option<bool>) -> RoomSummary {
        RoomSummary {
            players: vec![
                PlayerEntry {
                    username: "Alice".to_string(),
                    description: Some("SUBMIT_IMAGE".to_string()),
                },
                PlayerEntry {
                    username: "Billy".to_string(),
                    description: Some("WAIT".to_string()),
                },
            ],
            can_join,
            can_start,
            phase_number: Some(1),
        }
    }

    #[test]
    fn test_render_identity_and_roster() {
        let screen = render_view(&view(
            Phase::Waiting,
            summary(Some(false), Some(true)),
            AvailableAction::None,
        ));
        assert!(screen.contains("Your Name: Billy"));
        assert!(screen.contains("This Room's Code: TheClubhouse"));
        assert!(screen.contains("Game Status: In Progress"));
        assert!(screen.contains("Round: 1 of 2"));
        assert!(screen.contains("  Alice: Drawing..."));
        assert!(screen.contains("  Billy (YOU): Done for Now..."));
        assert!(screen.contains("Waiting for the other players..."));
        assert!(!screen.contains(START_WARNING));
    }

    #[test]
    fn test_render_drawing_prompt() {
        let phase = Phase::AwaitingImage {
            prompt: "Punk rock".to_string(),
            previous_username: Some("Alice".to_string()),
            next_username: Some("Carol".to_string()),
        };
        let screen = render_view(&view(
            phase,
            summary(Some(false), Some(true)),
            AvailableAction::SubmitImage { enabled: true },
        ));
        assert!(screen.contains("Submit an Image"));
        assert!(screen.contains("Draw this phrase (from Alice): \"Punk rock\""));
        assert!(screen.contains("Your drawing (that will go to Carol):"));
        assert!(screen.contains("> image <path>"));
    }

    #[test]
    fn test_render_caption_prompt_hides_data_url() {
        let phase = Phase::AwaitingPhrase {
            prompt: ImageRef::new("data:image/png;base64,AAAA"),
            previous_username: Some("Alice".to_string()),
            next_username: None,
        };
        let screen = render_view(&view(
            phase,
            summary(Some(false), Some(true)),
            AvailableAction::SubmitPhrase { enabled: true },
        ));
        assert!(screen.contains("Prompt: <inline image, 26 bytes>"));
        assert!(screen.contains("(This image drawn for you by Alice)"));
        assert!(!screen.contains("base64"));
    }

    #[test]
    fn test_render_initial_phrase_blocked_with_warning() {
        let phase = Phase::AwaitingInitialPhrase {
            next_username: Some("Alice".to_string()),
        };
        let screen = render_view(&view(
            phase,
            summary(Some(true), Some(false)),
            AvailableAction::SubmitPhrase { enabled: false },
        ));
        assert!(screen.contains("Game Status: Waiting for Players"));
        assert!(screen.contains("Round: 1 of ???"));
        assert!(screen.contains("Can't start yet"));
        assert!(screen.contains(START_WARNING));
    }

    #[test]
    fn test_render_unfetched_view() {
        let screen = render_view(&SessionView::default());
        assert!(screen.contains("Not in a room yet"));
        assert!(screen.contains("Game Status: ???"));
        assert!(screen.contains("Round: ???"));
        assert!(screen.contains("(none yet)"));
        assert!(screen.contains("Waiting for the game..."));
    }

    #[test]
    fn test_render_game_over_points_to_results() {
        let screen = render_view(&view(
            Phase::GameOver,
            RoomSummary::default(),
            AvailableAction::None,
        ));
        assert!(screen.contains("Game Over!"));
        assert!(screen.contains("results"));
    }

    #[test]
    fn test_render_results() {
        let chains = vec![ResultChain {
            originator: "Billy".to_string(),
            submissions: vec![
                "Bacteria".to_string(),
                "data:image/png;base64,AAAA".to_string(),
                "Germs".to_string(),
            ],
        }];
        let text = render_results(&chains);

        assert!(text.contains("Player Billy originally submitted:"));
        assert!(text.contains("  \"Bacteria\""));
        assert!(text.contains("  [<inline image, 26 bytes>]"));
        assert!(text.contains("  \"Germs\""));
        assert_eq!(text.matches("Leading to...").count(), 2);
        assert!(!text.trim_end().ends_with("Leading to..."));
    }

    #[test]
    fn test_render_no_results() {
        assert!(render_results(&[]).contains("No chains to show."));
    }
}
