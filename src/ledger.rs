//! Drawn-number ledger
//!
//! Ordered record of drawn numbers, most recent first. Persisted to
//! LocalStorage as a plain JSON array of integers so the history survives a
//! reload; anything malformed loads as an empty ledger instead of an error.

use serde::{Deserialize, Serialize};

/// Ordered drawn numbers, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<u8>,
}

impl Ledger {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bingo_globe_drawn";

    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a freshly drawn number at the front
    ///
    /// Returns false (and leaves the ledger unchanged) if the number is
    /// already present.
    pub fn record(&mut self, number: u8) -> bool {
        if self.contains(number) {
            return false;
        }
        self.entries.insert(0, number);
        true
    }

    pub fn contains(&self, number: u8) -> bool {
        self.entries.contains(&number)
    }

    /// Most recently drawn number
    pub fn latest(&self) -> Option<u8> {
        self.entries.first().copied()
    }

    /// All drawn numbers, most recent first
    pub fn numbers(&self) -> &[u8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Parse a persisted ledger, falling back to empty on malformed data
    ///
    /// Valid data is a JSON array of unique integers in 1..=total.
    pub fn from_json(json: &str, total: u8) -> Self {
        match serde_json::from_str::<Vec<u8>>(json) {
            Ok(numbers) if Self::valid(&numbers, total) => Self { entries: numbers },
            Ok(_) => {
                log::warn!("Discarding persisted ledger with out-of-range or duplicate numbers");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to parse persisted ledger: {}", e);
                Self::new()
            }
        }
    }

    /// Serialize to the persisted JSON array form
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn valid(numbers: &[u8], total: u8) -> bool {
        let mut seen = [false; 256];
        numbers.iter().all(|&n| {
            if n == 0 || n > total || seen[n as usize] {
                return false;
            }
            seen[n as usize] = true;
            true
        })
    }

    /// Load the ledger from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let ledger = Self::from_json(&json, crate::consts::BALL_COUNT);
                log::info!("Loaded ledger with {} drawn numbers", ledger.len());
                return ledger;
            }
        }

        log::info!("No persisted ledger, starting fresh");
        Self::new()
    }

    /// Save the ledger to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Ledger saved ({} numbers)", self.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_COUNT;

    #[test]
    fn test_record_keeps_most_recent_first() {
        let mut ledger = Ledger::new();
        assert!(ledger.record(12));
        assert!(ledger.record(5));
        assert!(ledger.record(61));
        assert_eq!(ledger.numbers(), &[61, 5, 12]);
        assert_eq!(ledger.latest(), Some(61));
    }

    #[test]
    fn test_record_rejects_duplicates() {
        let mut ledger = Ledger::new();
        assert!(ledger.record(7));
        assert!(!ledger.record(7));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let mut ledger = Ledger::new();
        for n in [42, 3, 75, 1] {
            ledger.record(n);
        }
        let json = ledger.to_json();
        assert_eq!(json, "[1,75,3,42]");
        let restored = Ledger::from_json(&json, BALL_COUNT);
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_malformed_json_falls_back_to_empty() {
        assert!(Ledger::from_json("not json", BALL_COUNT).is_empty());
        assert!(Ledger::from_json("{\"a\":1}", BALL_COUNT).is_empty());
        assert!(Ledger::from_json("[1,2,\"x\"]", BALL_COUNT).is_empty());
        assert!(Ledger::from_json("[1,2,300]", BALL_COUNT).is_empty());
    }

    #[test]
    fn test_out_of_range_or_duplicate_numbers_fall_back_to_empty() {
        assert!(Ledger::from_json("[0]", BALL_COUNT).is_empty());
        assert!(Ledger::from_json("[76]", BALL_COUNT).is_empty());
        assert!(Ledger::from_json("[5,5]", BALL_COUNT).is_empty());
        // In-range data loads intact
        assert_eq!(Ledger::from_json("[75,1]", BALL_COUNT).len(), 2);
    }

    #[test]
    fn test_clear_empties_the_ledger() {
        let mut ledger = Ledger::new();
        ledger.record(9);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.latest(), None);
    }
}
