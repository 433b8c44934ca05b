//! Best score tracking
//!
//! A single number, loaded once at startup and written back whenever a round
//! beats it. Storage trouble never blocks play: reads fall back to 0 and
//! failed writes are only logged.

use crate::persistence::ScoreStore;

/// Best score across rounds (never decreases)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flabbyBirdHighScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Fold in a finished round's score. Returns true if it's a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Read the stored best, treating any failure as 0
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    Self::new(value)
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable best score {:?}: {}", raw, e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Best score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Write the best back; failures are logged and skipped
    pub fn save(&self, store: &mut impl ScoreStore) {
        match store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", self.value),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}
