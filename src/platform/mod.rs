//! Platform abstraction layer
//!
//! The seams between the simulation and whatever hosts it:
//! - Input events (keyboard/pointer/touch) mapped to game actions
//! - A `Presenter` that draws or reports the state after each frame

use crate::sim::{GamePhase, GameState};

/// The three things a player can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    Start,
    Restart,
}

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

impl Key {
    /// From a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Raw input from the host, before phase-dependent mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Click or tap on the playfield
    Pointer,
    /// Start button on the title screen
    StartButton,
    /// Restart button on the game over screen
    RestartButton,
}

/// Map a raw input to an action for the current phase.
///
/// Space drives every screen: start, flap, restart. Clicks and taps only flap
/// mid-round so a stray tap can't skip the game over screen.
pub fn map_input(event: InputEvent, phase: GamePhase) -> Option<Action> {
    match (event, phase) {
        (InputEvent::Key(Key::Space), GamePhase::Start) => Some(Action::Start),
        (InputEvent::Key(Key::Space), GamePhase::Playing) => Some(Action::Flap),
        (InputEvent::Key(Key::Space), GamePhase::GameOver) => Some(Action::Restart),
        (InputEvent::Pointer, GamePhase::Playing) => Some(Action::Flap),
        (InputEvent::StartButton, _) => Some(Action::Start),
        (InputEvent::RestartButton, _) => Some(Action::Restart),
        _ => None,
    }
}

/// Consumer of the state after each frame. Never mutates gameplay.
pub trait Presenter {
    fn render(&mut self, state: &GameState);
}

/// Presenter that reports phase and score changes through `log`
#[derive(Debug, Default)]
pub struct LogPresenter {
    last: Option<(GamePhase, u32)>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn render(&mut self, state: &GameState) {
        let now = (state.phase, state.score);
        if self.last == Some(now) {
            return;
        }
        self.last = Some(now);
        match state.phase {
            GamePhase::Start => log::info!("Title screen (best {})", state.best.value()),
            GamePhase::Playing => log::info!("Score: {}", state.score),
            GamePhase::GameOver => log::info!(
                "Final score {} | best {}",
                state.score,
                state.best.value()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_follows_phase() {
        let space = InputEvent::Key(Key::Space);
        assert_eq!(map_input(space, GamePhase::Start), Some(Action::Start));
        assert_eq!(map_input(space, GamePhase::Playing), Some(Action::Flap));
        assert_eq!(map_input(space, GamePhase::GameOver), Some(Action::Restart));
    }

    #[test]
    fn test_pointer_only_flaps_mid_round() {
        assert_eq!(map_input(InputEvent::Pointer, GamePhase::Start), None);
        assert_eq!(
            map_input(InputEvent::Pointer, GamePhase::Playing),
            Some(Action::Flap)
        );
        assert_eq!(map_input(InputEvent::Pointer, GamePhase::GameOver), None);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert_eq!(map_input(InputEvent::Key(Key::from_code("KeyA")), GamePhase::Playing), None);
    }

    #[test]
    fn test_buttons_map_directly() {
        assert_eq!(
            map_input(InputEvent::RestartButton, GamePhase::GameOver),
            Some(Action::Restart)
        );
        assert_eq!(
            map_input(InputEvent::StartButton, GamePhase::Start),
            Some(Action::Start)
        );
    }
}
