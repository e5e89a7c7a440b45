//! Player preferences
//!
//! Persisted in LocalStorage, separate from game balance.

use serde::{Deserialize, Serialize};

use crate::game::Game;

/// Something a key press can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    /// Start from the intro screen, or play again after game over
    Start,
    /// Toggle idle/demo mode
    ToggleAutopilot,
}

/// Key names (as reported by `KeyboardEvent.key`) bound to each action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub fire: Vec<String>,
    pub start: Vec<String>,
    pub autopilot: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }
        Self {
            move_left: keys(&["ArrowLeft", "a"]),
            move_right: keys(&["ArrowRight", "d"]),
            fire: keys(&["x", " "]),
            start: keys(&["Enter"]),
            autopilot: keys(&["i"]),
        }
    }
}

impl KeyBindings {
    /// Look up the action for a key. Single-character keys match either case.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let bound_to = |keys: &[String]| {
            keys.iter()
                .any(|b| b == key || (b.len() == 1 && b.eq_ignore_ascii_case(key)))
        };

        if bound_to(&self.move_left) {
            Some(Action::MoveLeft)
        } else if bound_to(&self.move_right) {
            Some(Action::MoveRight)
        } else if bound_to(&self.fire) {
            Some(Action::Fire)
        } else if bound_to(&self.start) {
            Some(Action::Start)
        } else if bound_to(&self.autopilot) {
            Some(Action::ToggleAutopilot)
        } else {
            None
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Start sessions in idle/demo mode
    pub autopilot: bool,
    /// Log every game event, not just lifecycle changes
    pub verbose_events: bool,
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "invader_rush_settings";

    /// Pull preferences the player changed during the session back in
    pub fn remember(&mut self, game: &Game) {
        self.autopilot = game.autopilot();
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
