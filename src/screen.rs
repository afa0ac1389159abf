/// The exclusive current mode. Exactly one is active at a time; it gates
/// which inputs are accepted and what is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenState {
    Menu,
    Playing,
    ConfirmingDifficultyChange,
    ConfirmingReset,
    Settings,
    GameOver,
}

/// State-machine events. These are produced by the controller after input
/// guards have been applied, so the transition function stays total over
/// (state, event) with no hidden conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Space on the menu or game-over screen.
    Start,
    /// The difficulty check raised the tier; already applied to the session.
    TierRaised,
    /// The player asked to abandon the run (reset button / Esc while playing).
    ResetRequested,
    /// Yes/no answer on either confirmation screen.
    Confirm { accept: bool },
    OpenSettings,
    /// Closing settings routes back to wherever the player came from, which
    /// is derivable from whether a session is in progress.
    CloseSettings { session_in_progress: bool },
    /// Lives reached zero on a wrong answer.
    LivesExhausted,
}

/// The transition table. Returns `None` when the event is not accepted in
/// the given state, leaving the state unchanged.
pub fn transition(state: ScreenState, event: ScreenEvent) -> Option<ScreenState> {
    use ScreenEvent::*;
    use ScreenState::*;

    match (state, event) {
        (Menu, Start) | (GameOver, Start) => Some(Playing),
        (Menu, OpenSettings) | (Playing, OpenSettings) => Some(Settings),

        (Playing, TierRaised) => Some(ConfirmingDifficultyChange),
        (Playing, ResetRequested) => Some(ConfirmingReset),
        (Playing, LivesExhausted) => Some(GameOver),

        // Tier change is already applied when the prompt shows; accepting
        // only resumes play, declining abandons the run.
        (ConfirmingDifficultyChange, Confirm { accept: true }) => Some(Playing),
        (ConfirmingDifficultyChange, Confirm { accept: false }) => Some(Menu),

        (ConfirmingReset, Confirm { accept: true }) => Some(Menu),
        (ConfirmingReset, Confirm { accept: false }) => Some(Playing),

        (Settings, CloseSettings { session_in_progress: true }) => Some(Playing),
        (Settings, CloseSettings { session_in_progress: false }) => Some(Menu),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_start_from_menu_and_game_over() {
        assert_matches!(
            transition(ScreenState::Menu, ScreenEvent::Start),
            Some(ScreenState::Playing)
        );
        assert_matches!(
            transition(ScreenState::GameOver, ScreenEvent::Start),
            Some(ScreenState::Playing)
        );
    }

    #[test]
    fn test_tier_raise_only_from_playing() {
        assert_matches!(
            transition(ScreenState::Playing, ScreenEvent::TierRaised),
            Some(ScreenState::ConfirmingDifficultyChange)
        );
        // A tier already confirmed never re-prompts: the event cannot fire
        // from the confirmation screen itself or from the menu.
        assert_eq!(
            transition(ScreenState::ConfirmingDifficultyChange, ScreenEvent::TierRaised),
            None
        );
        assert_eq!(transition(ScreenState::Menu, ScreenEvent::TierRaised), None);
    }

    #[test]
    fn test_difficulty_confirmation() {
        assert_matches!(
            transition(
                ScreenState::ConfirmingDifficultyChange,
                ScreenEvent::Confirm { accept: true }
            ),
            Some(ScreenState::Playing)
        );
        assert_matches!(
            transition(
                ScreenState::ConfirmingDifficultyChange,
                ScreenEvent::Confirm { accept: false }
            ),
            Some(ScreenState::Menu)
        );
    }

    #[test]
    fn test_reset_confirmation() {
        assert_matches!(
            transition(ScreenState::Playing, ScreenEvent::ResetRequested),
            Some(ScreenState::ConfirmingReset)
        );
        assert_matches!(
            transition(ScreenState::ConfirmingReset, ScreenEvent::Confirm { accept: true }),
            Some(ScreenState::Menu)
        );
        assert_matches!(
            transition(ScreenState::ConfirmingReset, ScreenEvent::Confirm { accept: false }),
            Some(ScreenState::Playing)
        );
    }

    #[test]
    fn test_settings_routing() {
        assert_matches!(
            transition(ScreenState::Menu, ScreenEvent::OpenSettings),
            Some(ScreenState::Settings)
        );
        assert_matches!(
            transition(ScreenState::Playing, ScreenEvent::OpenSettings),
            Some(ScreenState::Settings)
        );
        assert_matches!(
            transition(
                ScreenState::Settings,
                ScreenEvent::CloseSettings { session_in_progress: true }
            ),
            Some(ScreenState::Playing)
        );
        assert_matches!(
            transition(
                ScreenState::Settings,
                ScreenEvent::CloseSettings { session_in_progress: false }
            ),
            Some(ScreenState::Menu)
        );
    }

    #[test]
    fn test_game_over_on_exhausted_lives() {
        assert_matches!(
            transition(ScreenState::Playing, ScreenEvent::LivesExhausted),
            Some(ScreenState::GameOver)
        );
    }

    #[test]
    fn test_unaccepted_events_leave_state_unchanged() {
        assert_eq!(transition(ScreenState::Menu, ScreenEvent::ResetRequested), None);
        assert_eq!(
            transition(ScreenState::GameOver, ScreenEvent::Confirm { accept: true }),
            None
        );
        assert_eq!(
            transition(ScreenState::Settings, ScreenEvent::Start),
            None
        );
        assert_eq!(
            transition(ScreenState::ConfirmingReset, ScreenEvent::OpenSettings),
            None
        );
    }
}
