//! Input mapping
//!
//! Browser key names and pointer presses become game commands. The
//! mapping depends on the phase because Space both starts and jumps.

use crate::sim::GamePhase;

/// What a key or pointer press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    Start,
    Pause,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value
pub fn key_command(key: &str, phase: GamePhase) -> Option<Command> {
    match key {
        " " | "Spacebar" if phase.is_idle() => Some(Command::Start),
        " " | "Spacebar" | "ArrowUp" => Some(Command::Jump),
        "Escape" => Some(Command::Pause),
        "i" | "I" => Some(Command::ToggleAutopilot),
        _ => None,
    }
}

/// Primary pointer press (mouse button or touch)
pub fn pointer_command(phase: GamePhase) -> Option<Command> {
    (phase == GamePhase::Running).then_some(Command::Jump)
}

/// Keys whose default browser action (scrolling) should be suppressed
pub fn is_game_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar" | "ArrowUp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_starts_when_idle() {
        assert_eq!(key_command(" ", GamePhase::NotStarted), Some(Command::Start));
        assert_eq!(key_command(" ", GamePhase::GameOver), Some(Command::Start));
        assert_eq!(key_command(" ", GamePhase::Running), Some(Command::Jump));
    }

    #[test]
    fn test_arrow_up_never_starts() {
        for phase in [GamePhase::NotStarted, GamePhase::Running, GamePhase::GameOver] {
            assert_eq!(key_command("ArrowUp", phase), Some(Command::Jump));
        }
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(key_command("Escape", GamePhase::Running), Some(Command::Pause));
        assert_eq!(key_command("I", GamePhase::Paused), Some(Command::ToggleAutopilot));
        assert_eq!(key_command("x", GamePhase::Running), None);
        assert!(is_game_key(" "));
        assert!(!is_game_key("Escape"));
    }

    #[test]
    fn test_pointer_only_jumps_while_running() {
        assert_eq!(pointer_command(GamePhase::Running), Some(Command::Jump));
        assert_eq!(pointer_command(GamePhase::NotStarted), None);
        assert_eq!(pointer_command(GamePhase::Paused), None);
    }
}
