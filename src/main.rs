//! Flabby Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use flabby_bird::persistence::LocalStore;
    use flabby_bird::platform::{InputEvent, Key, Presenter};
    use flabby_bird::sim::{GamePhase, GameState};
    use flabby_bird::{Game, Settings, Tuning};

    type WebGame = Game<LocalStore, DomPresenter>;

    /// Reflects score and phase into the page's overlay elements.
    /// Canvas drawing reads `snapshot()` from JS.
    struct DomPresenter {
        document: Document,
        last: Option<(GamePhase, u32, u32)>,
    }

    impl DomPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    impl Presenter for DomPresenter {
        fn render(&mut self, state: &GameState) {
            let now = (state.phase, state.score, state.best.value());
            if self.last == Some(now) {
                return;
            }
            self.last = Some(now);

            self.set_text("currentScore", &state.score.to_string());
            self.set_text("highScore", &state.best.value().to_string());
            self.set_hidden("startScreen", state.phase != GamePhase::Start);
            self.set_hidden("gameOverScreen", state.phase != GamePhase::GameOver);
            if state.phase == GamePhase::GameOver {
                self.set_text("finalScore", &state.score.to_string());
            }
        }
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<WebGame>>>> = const { RefCell::new(None) };
    }

    /// Current state as JSON for the JS canvas renderer
    #[wasm_bindgen]
    pub fn snapshot() -> JsValue {
        GAME.with(|g| {
            g.borrow()
                .as_ref()
                .and_then(|game| serde_json::to_string(&game.borrow().state().snapshot()).ok())
                .map(|json| JsValue::from_str(&json))
                .unwrap_or(JsValue::NULL)
        })
    }

    /// Slider hook; returns false if the value was rejected
    #[wasm_bindgen]
    pub fn set_heaviness(value: f32) -> bool {
        with_game(|game| game.set_heaviness(value))
    }

    /// Slider hook; returns false if the value was rejected
    #[wasm_bindgen]
    pub fn set_speed(value: f32) -> bool {
        with_game(|game| game.set_speed(value))
    }

    fn with_game(f: impl FnOnce(&mut WebGame) -> Result<(), flabby_bird::ConfigError>) -> bool {
        GAME.with(|g| match g.borrow().as_ref() {
            Some(game) => match f(&mut game.borrow_mut()) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Rejected setting: {}", e);
                    false
                }
            },
            None => false,
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flabby Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let presenter = DomPresenter {
            document: document.clone(),
            last: None,
        };
        let game = match Game::new(
            seed,
            Tuning::default(),
            Settings::default(),
            LocalStore::new(),
            presenter,
        ) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };
        GAME.with(|g| *g.borrow_mut() = Some(game.clone()));

        setup_input_handlers(&document, game.clone());
        request_animation_frame(game);

        log::info!("Flabby Bird running!");
    }

    fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
        target: &web_sys::EventTarget,
        name: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<WebGame>>) {
        {
            let game = game.clone();
            listen(document, "keydown", move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                if key == Key::Space {
                    event.prevent_default();
                }
                game.borrow_mut().on_input(InputEvent::Key(key));
            });
        }

        if let Some(canvas) = document.get_element_by_id("gameCanvas") {
            {
                let game = game.clone();
                listen(&canvas, "click", move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().on_input(InputEvent::Pointer);
                });
            }
            {
                let game = game.clone();
                listen(&canvas, "touchstart", move |event: web_sys::TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().on_input(InputEvent::Pointer);
                });
            }
        }

        let buttons = [
            ("startBtn", InputEvent::StartButton),
            ("restartBtn", InputEvent::RestartButton),
        ];
        for (id, input) in buttons {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().on_input(input);
                });
            }
        }

        // Don't replay a hidden tab's backlog as one huge step
        {
            let doc = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if doc.hidden() {
                    game.borrow_mut().pause_clock();
                    log::info!("Clock paused (tab hidden)");
                }
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flabby_bird::persistence::JsonFileStore;
    use flabby_bird::platform::LogPresenter;
    use flabby_bird::sim::GamePhase;
    use flabby_bird::{Game, Settings, Tuning};

    /// Demo rounds stop after two simulated minutes
    const DEMO_FRAMES: u32 = 60 * 120;

    env_logger::init();
    log::info!("Flabby Bird (native) starting...");
    log::info!("No renderer on native - running a headless autopilot round");

    let path = std::env::var_os("FLABBY_BIRD_SAVE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("flabby-bird.json"));
    let store = JsonFileStore::new(path);

    let seed: u64 = rand::random();
    let mut game = match Game::new(
        seed,
        Tuning::default(),
        Settings::default(),
        store,
        LogPresenter::new(),
    ) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    game.set_idle_mode(true);
    for _ in 0..DEMO_FRAMES {
        game.advance(1.0);
        if game.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    println!(
        "Autopilot scored {} (best {}, saved to {})",
        state.score,
        state.best.value(),
        game.store().path().display()
    );
}
