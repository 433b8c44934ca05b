//! Game state and core simulation types
//!
//! One `GameState` is one play session: the bird, the pipe stream, score and
//! best score, and the settings that shape them. Nothing here is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipes::{Pipe, PipeStream};
use crate::consts::GROUND_PATTERN;
use crate::highscores::BestScore;
use crate::settings::Settings;
use crate::tuning::{ConfigError, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, bird floats in place
    Start,
    /// Active gameplay
    Playing,
    /// Round ended, simulation frozen
    GameOver,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ground,
    Pipe,
}

/// Things that happened during a tick, for sound/UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Flapped,
    /// Cleared a pipe; carries the new score
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    /// Best score was beaten and needs persisting
    NewBest { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for the pipe RNG
    pub seed: u64,
    pub phase: GamePhase,
    /// Pipes cleared this round
    pub score: u32,
    pub best: BestScore,
    pub bird: Bird,
    pub pipes: PipeStream,
    pub settings: Settings,
    /// Simulated time in ms, drives the title-screen float
    pub elapsed_ms: f64,
    /// Ground texture scroll (0..GROUND_PATTERN)
    pub ground_offset: f32,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        best: BestScore,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            best,
            bird: Bird::new(),
            pipes: PipeStream::new(tuning, seed)?,
            settings,
            elapsed_ms: 0.0,
            ground_offset: 0.0,
            events: Vec::new(),
        })
    }

    pub fn tuning(&self) -> &Tuning {
        self.pipes.tuning()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh round: clear pipes and score, respawn the bird, start playing
    pub fn start_round(&mut self) {
        self.score = 0;
        self.pipes.clear();
        self.bird.reset();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::RoundStarted);
        log::info!("Round started (best {})", self.best.value());
    }

    pub fn flap(&mut self) {
        self.bird.flap(&self.settings);
        self.push_event(GameEvent::Flapped);
    }

    /// Bump the score by one cleared pipe
    pub fn add_point(&mut self) {
        self.score += 1;
        self.push_event(GameEvent::Scored { score: self.score });
    }

    /// End the round and fold the score into the best
    pub fn crash(&mut self, cause: CrashCause) {
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        if self.best.submit(self.score) {
            self.push_event(GameEvent::NewBest { score: self.score });
            log::info!("New best score: {}", self.score);
        }
        log::info!("Game over ({:?}) with score {}", cause, self.score);
    }

    /// Slide the ground texture along with the pipes
    pub fn scroll_ground(&mut self, dt: f32) {
        let step = self.tuning().pipe_speed * dt * self.settings.speed();
        self.ground_offset = (self.ground_offset + step).rem_euclid(GROUND_PATTERN);
    }

    /// Plain-data view for presenters
    pub fn snapshot(&self) -> Snapshot {
        let tuning = self.tuning();
        Snapshot {
            phase: self.phase,
            score: self.score,
            best_score: self.best.value(),
            bird_pos: self.bird.pos,
            bird_size: self.bird.size(&self.settings),
            bird_rotation: self.bird.rotation,
            bird_wobble: self.bird.wobble,
            bird_flapping: self.bird.is_flapping(),
            bird_sweating: self.bird.is_sweating(),
            pipes: self.pipes.pipes().to_vec(),
            pipe_width: tuning.pipe_width,
            pipe_gap: tuning.pipe_gap,
            floor: tuning.floor(),
            ground_offset: self.ground_offset,
            heaviness: self.settings.heaviness(),
            speed: self.settings.speed(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    pub bird_pos: Vec2,
    pub bird_size: Vec2,
    pub bird_rotation: f32,
    pub bird_wobble: f32,
    pub bird_flapping: bool,
    pub bird_sweating: bool,
    pub pipes: Vec<Pipe>,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub floor: f32,
    pub ground_offset: f32,
    pub heaviness: f32,
    pub speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(1, Tuning::default(), Settings::default(), BestScore::new(3)).unwrap()
    }

    #[test]
    fn test_new_session_is_on_title() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.best.value(), 3);
    }

    #[test]
    fn test_bad_tuning_is_fatal() {
        let tuning = Tuning {
            pipe_gap: 1000.0,
            ..Default::default()
        };
        assert!(GameState::new(1, tuning, Settings::default(), BestScore::default()).is_err());
    }

    #[test]
    fn test_crash_below_best_keeps_best() {
        let mut state = state();
        state.start_round();
        state.add_point();
        state.crash(CrashCause::Pipe);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.best.value(), 3);
        let events = state.drain_events();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_crash_above_best_raises_it() {
        let mut state = state();
        state.start_round();
        for _ in 0..5 {
            state.add_point();
        }
        state.crash(CrashCause::Ground);

        assert_eq!(state.best.value(), 5);
        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::NewBest { score: 5 })
        );
    }

    #[test]
    fn test_start_round_resets_score_and_bird() {
        let mut state = state();
        state.start_round();
        state.add_point();
        state.bird.pos.y = 10.0;
        state.pipes.spawn();
        state.crash(CrashCause::Pipe);

        state.start_round();
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.pos, Bird::new().pos);
        assert!(state.pipes.pipes().is_empty());
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut state = state();
        for _ in 0..20 {
            state.scroll_ground(1.0);
        }
        // 60 px of travel on a 40 px pattern
        assert!((state.ground_offset - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = state();
        state.pipes.spawn();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pipes.len(), 1);
        assert_eq!(back.bird_size, Vec2::new(45.0, 38.0));
    }
}
