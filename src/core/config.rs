//! Board configuration.
//!
//! Hosts describe the board once at creation:
//! - dimensions (`x_count × y_count`, fixed for the board's lifetime)
//! - alphabet size (`letter_count`)
//! - RNG seed for the default symbol source
//! - cascade cap for the resolution loop
//! - how many undrained events to keep (0 turns recording off)
//!
//! ```
//! use match3::core::BoardConfig;
//!
//! let config = BoardConfig::new(8, 8)
//!     .with_letter_count(6)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{BoardError, Result};

/// Alphabets below this size make refill starvation likely.
pub const RECOMMENDED_MIN_LETTERS: u8 = 4;

/// Default number of undrained events a board keeps.
pub const DEFAULT_EVENT_CAPACITY: usize = 4096;

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns.
    pub x_count: usize,

    /// Number of rows.
    pub y_count: usize,

    /// Alphabet size; symbols are `0..letter_count`.
    pub letter_count: u8,

    /// Seed for the default RNG-backed symbol source.
    /// Same seed and same taps produce the same game.
    pub seed: u64,

    /// Maximum detect/compact/refill passes per resolution.
    pub max_cascade_passes: u32,

    /// Undrained events kept before the oldest are dropped.
    /// Zero disables event recording for hosts that only poll.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            x_count: 8,
            y_count: 8,
            letter_count: 5,
            seed: 42,
            max_cascade_passes: 64,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// Create a config with the given dimensions and default everything else.
    pub fn new(x_count: usize, y_count: usize) -> Self {
        Self {
            x_count,
            y_count,
            ..Self::default()
        }
    }

    /// Set the alphabet size.
    #[must_use]
    pub fn with_letter_count(mut self, letter_count: u8) -> Self {
        self.letter_count = letter_count;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cascade cap.
    #[must_use]
    pub fn with_max_cascade_passes(mut self, passes: u32) -> Self {
        self.max_cascade_passes = passes;
        self
    }

    /// Set the event log capacity; zero turns event recording off.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.x_count * self.y_count
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.x_count == 0 {
            return Err(BoardError::InvalidConfig("x_count must be > 0".into()));
        }
        if self.y_count == 0 {
            return Err(BoardError::InvalidConfig("y_count must be > 0".into()));
        }
        if self.x_count.checked_mul(self.y_count).is_none() {
            return Err(BoardError::InvalidConfig(
                "x_count * y_count overflows".into(),
            ));
        }
        if self.letter_count < 2 {
            return Err(BoardError::InvalidConfig(
                "letter_count must be >= 2".into(),
            ));
        }
        if self.max_cascade_passes == 0 {
            return Err(BoardError::InvalidConfig(
                "max_cascade_passes must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// True if the alphabet is large enough to keep refill from starving.
    #[must_use]
    pub fn has_comfortable_alphabet(&self) -> bool {
        self.letter_count >= RECOMMENDED_MIN_LETTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.x_count, 8);
        assert_eq!(config.y_count, 8);
        assert_eq!(config.letter_count, 5);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
        assert!(config.has_comfortable_alphabet());
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_event_capacity_defaults_when_missing() {
        let json = r#"{"x_count":3,"y_count":3,"letter_count":4,"seed":1,"max_cascade_passes":8}"#;
        let config: BoardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
        assert_eq!(BoardConfig::new(3, 3).with_event_capacity(0).event_capacity, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BoardConfig::new(5, 3)
            .with_letter_count(4)
            .with_seed(123)
            .with_max_cascade_passes(10);

        assert_eq!(config.x_count, 5);
        assert_eq!(config.y_count, 3);
        assert_eq!(config.letter_count, 4);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_cascade_passes, 10);
        assert_eq!(config.cell_count(), 15);
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        assert_eq!(
            BoardConfig::new(0, 4).validate(),
            Err(BoardError::InvalidConfig("x_count must be > 0".into()))
        );
        assert_eq!(
            BoardConfig::new(4, 0).validate(),
            Err(BoardError::InvalidConfig("y_count must be > 0".into()))
        );
    }

    #[test]
    fn test_validate_rejects_tiny_alphabet() {
        let config = BoardConfig::new(3, 3).with_letter_count(1);
        assert!(matches!(config.validate(), Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_cascade_cap() {
        let config = BoardConfig::new(3, 3).with_max_cascade_passes(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_small_alphabet_is_valid_but_uncomfortable() {
        let config = BoardConfig::new(3, 3).with_letter_count(3);
        assert!(config.validate().is_ok());
        assert!(!config.has_comfortable_alphabet());
    }

    #[test]
    fn test_serialization() {
        let config = BoardConfig::new(6, 9).with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
