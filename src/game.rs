//! Frame driver
//!
//! Owns the session, the frame clock, the best-score store and the presenter.
//! Hosts call `on_input`/`on_action` from their event handlers and `frame`
//! from their refresh callback; queued actions apply at the next tick.

use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::platform::{Action, InputEvent, Presenter, map_input};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Stepper, TickInput, tick};
use crate::tuning::{ConfigError, Tuning};

/// Game instance holding all state
pub struct Game<S: ScoreStore, P: Presenter> {
    state: GameState,
    stepper: Stepper,
    input: TickInput,
    store: S,
    presenter: P,
}

impl<S: ScoreStore, P: Presenter> Game<S, P> {
    /// Build a session, reading the best score from `store`
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        store: S,
        presenter: P,
    ) -> Result<Self, ConfigError> {
        let best = BestScore::load(&store);
        let state = GameState::new(seed, tuning, settings, best)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state,
            stepper: Stepper::new(),
            input: TickInput::default(),
            store,
            presenter,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Queue an action for the next tick
    pub fn on_action(&mut self, action: Action) {
        match action {
            Action::Flap => self.input.flap = true,
            Action::Start => self.input.start = true,
            Action::Restart => self.input.restart = true,
        }
    }

    /// Map a raw input against the current phase and queue it
    pub fn on_input(&mut self, event: InputEvent) {
        if let Some(action) = map_input(event, self.state.phase) {
            self.on_action(action);
        }
    }

    /// Toggle the autopilot demo
    pub fn set_idle_mode(&mut self, on: bool) {
        self.input.idle_mode = on;
    }

    pub fn set_heaviness(&mut self, heaviness: f32) -> Result<(), ConfigError> {
        self.state.settings.set_heaviness(heaviness)
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        self.state.settings.set_speed(speed)
    }

    /// Forget the last frame time, e.g. when the page was hidden
    pub fn pause_clock(&mut self) {
        self.stepper.reset();
    }

    /// Display refresh callback with a wall-clock timestamp in ms
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.stepper.step(now_ms);
        self.advance(dt);
    }

    /// Run `dt` nominal frames of simulation and present the result
    pub fn advance(&mut self, dt: f32) {
        let mut ran = false;
        for step in Stepper::substeps(dt) {
            self.tick_once(step);
            ran = true;
        }
        // Zero-length frames still apply queued actions
        if !ran {
            self.tick_once(0.0);
        }
        self.presenter.render(&self.state);
    }

    fn tick_once(&mut self, dt: f32) {
        tick(&mut self.state, &self.input, dt);
        self.input.clear_actions();

        for event in self.state.drain_events() {
            if let GameEvent::NewBest { .. } = event {
                self.state.best.save(&mut self.store);
            }
        }
    }
}
