//! Volume preference
//!
//! Persisted separately from the drawn-number ledger in LocalStorage.

use serde::{Deserialize, Serialize};

/// Default volume (half)
pub const DEFAULT_VOLUME: f32 = 0.5;
/// Step applied by the volume +/- buttons
pub const VOLUME_STEP: f32 = 0.1;

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0), one-decimal granularity
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bingo_globe_settings";

    /// Nudge the volume by `delta`, clamped to [0, 1] and rounded to one
    /// decimal place
    pub fn adjust_volume(&mut self, delta: f32) {
        let v = (self.volume + delta).clamp(0.0, 1.0);
        self.volume = (v * 10.0).round() / 10.0;
    }

    /// Display form for the volume label
    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }

    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }

    /// Parse persisted settings, falling back to defaults on malformed data
    ///
    /// A volume outside [0, 1] (or non-finite) counts as malformed; it would
    /// otherwise feed the audio gain unclamped.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) if settings.volume.is_finite() && (0.0..=1.0).contains(&settings.volume) => {
                settings
            }
            Ok(settings) => {
                log::warn!(
                    "Discarding persisted volume {} outside [0, 1]",
                    settings.volume
                );
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse persisted settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let settings = Self::from_json(&json);
                log::info!("Loaded settings from LocalStorage");
                return settings;
            }
        }

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
