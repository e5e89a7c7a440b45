//! Invader Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use invader_rush::sim::GameEvent;

/// Longest frame gap fed to the simulation; longer gaps (hidden tab) are dropped
const MAX_FRAME_MS: u64 = 250;

/// Browser console threshold
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const CONSOLE_LEVEL: log::Level = log::Level::Info;

/// Console level for a game event. Lifecycle events always show; the rest
/// only when the player asked for verbose events.
fn event_level(event: &GameEvent, verbose: bool) -> Option<log::Level> {
    match event {
        GameEvent::GameOver { .. } | GameEvent::DifficultyRaised { .. } => Some(log::Level::Info),
        _ if verbose => Some(log::Level::Info),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use invader_rush::sim::{GameEvent, GamePhase};
    use invader_rush::{Game, Settings, Snapshot, Tuning};

    use super::{CONSOLE_LEVEL, MAX_FRAME_MS, event_level};

    /// Host-side wrapper: the session plus frame bookkeeping
    struct Shell {
        game: Game,
        settings: Settings,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl Shell {
        fn frame(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                (time - self.last_time).max(0.0) as u64
            } else {
                0
            };
            self.last_time = time;

            self.game.advance(elapsed.min(MAX_FRAME_MS));

            for event in self.game.drain_events() {
                log_event(&event, self.settings.verbose_events);
            }

            let snapshot = self.game.snapshot();
            if snapshot.phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, snapshot.phase);
                self.last_phase = snapshot.phase;
            }
            render(&snapshot);
        }
    }

    fn log_event(event: &GameEvent, verbose: bool) {
        if let Some(level) = event_level(event, verbose) {
            log::log!(level, "{:?}", event);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_overlay_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if hidden { "overlay hidden" } else { "overlay" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Absolutely positioned sprite markup for a list of positions
    fn sprites(class: &str, positions: &[glam::Vec2]) -> String {
        positions
            .iter()
            .map(|p| {
                format!(
                    "<div class=\"{}\" style=\"left:{:.2}%;top:{:.2}%\"></div>",
                    class,
                    p.x * 100.0,
                    p.y * 100.0
                )
            })
            .collect()
    }

    /// Push the snapshot into the DOM. The page owns all styling.
    fn render(snapshot: &Snapshot) {
        let Some(document) = document() else {
            return;
        };

        if let Some(player) = document.get_element_by_id("player") {
            let _ = player.set_attribute(
                "style",
                &format!("left:{:.2}%", snapshot.player.x * 100.0),
            );
        }
        if let Some(el) = document.get_element_by_id("bullets") {
            el.set_inner_html(&sprites("bullet", &snapshot.bullets));
        }
        if let Some(el) = document.get_element_by_id("enemies") {
            el.set_inner_html(&sprites("enemy", &snapshot.enemies));
        }

        set_text(&document, "hud-score", &snapshot.score.to_string());
        let ammo = if snapshot.reloading {
            format!("{} (Reloading...)", snapshot.ammo)
        } else {
            snapshot.ammo.to_string()
        };
        set_text(&document, "hud-ammo", &ammo);

        set_overlay_hidden(&document, "intro", snapshot.phase != GamePhase::NotStarted);
        set_overlay_hidden(&document, "game-over", snapshot.phase != GamePhase::GameOver);
        if snapshot.phase == GamePhase::GameOver {
            set_text(&document, "final-score", &snapshot.score.to_string());
        }

        // Expose the raw snapshot for custom renderers
        if let (Some(window), Ok(json)) = (web_sys::window(), serde_json::to_string(snapshot)) {
            let _ = js_sys::Reflect::set(
                &window,
                &JsValue::from_str("invaderRushSnapshot"),
                &JsValue::from_str(&json),
            );
        }
    }

    /// Balance overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(CONSOLE_LEVEL).expect("Failed to init logger");

        log::info!("Invader Rush starting...");

        let document = document().expect("no document");
        let settings = Settings::load();
        let tuning = load_tuning(&document);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, tuning);
        game.set_autopilot(settings.autopilot);
        log::info!("Game initialized with seed: {}", seed);

        let shell = Rc::new(RefCell::new(Shell {
            game,
            settings,
            last_time: 0.0,
            last_phase: GamePhase::NotStarted,
        }));

        setup_keyboard(shell.clone());
        setup_button(&document, "start-btn", shell.clone());
        setup_button(&document, "restart-btn", shell.clone());
        setup_unload(shell.clone());

        request_animation_frame(shell);

        log::info!("Invader Rush running!");
    }

    fn setup_keyboard(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut s = shell.borrow_mut();
            if let Some(action) = s.settings.bindings.action_for(&event.key()) {
                event.prevent_default();
                s.game.handle_action(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start and play-again buttons both map to the start action
    fn setup_button(document: &Document, id: &str, shell: Rc<RefCell<Shell>>) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                shell
                    .borrow_mut()
                    .game
                    .handle_action(invader_rush::Action::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_unload(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut s = shell.borrow_mut();
            let s = &mut *s;
            s.game.stop();
            s.settings.remember(&s.game);
            s.settings.save();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            shell.borrow_mut().frame(time);
            request_animation_frame(shell);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays one round and the result is logged
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use invader_rush::sim::GamePhase;
    use invader_rush::{Game, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Invader Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let tuning = match std::env::var("INVADER_RUSH_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Invalid tuning in {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut game = Game::new(seed, tuning);
    game.set_autopilot(true);
    game.start();

    // Ten simulated minutes at ~60 fps
    let frame_ms = 16;
    let max_frames = 10 * 60 * 1000 / frame_ms;
    for _ in 0..max_frames {
        game.advance(frame_ms.min(MAX_FRAME_MS));
        for event in game.drain_events() {
            let level = event_level(&event, false).unwrap_or(log::Level::Debug);
            log::log!(level, "{:?}", event);
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = game.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_events_reach_the_console() {
        let shot = GameEvent::ShotFired {
            bullet_id: 1,
            ammo_left: 3,
        };
        assert_eq!(event_level(&shot, false), None);
        let level = event_level(&shot, true).unwrap();
        assert!(level <= CONSOLE_LEVEL);
    }

    #[test]
    fn test_lifecycle_events_always_logged() {
        let over = GameEvent::GameOver { score: 12 };
        assert_eq!(event_level(&over, false), Some(log::Level::Info));
        assert_eq!(event_level(&over, true), Some(log::Level::Info));
    }
}
